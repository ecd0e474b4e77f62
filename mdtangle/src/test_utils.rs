//! Shared test utilities.

use crate::model::Block;

/// The blocks of a small two-file document: `index.js` with a `#greet`
/// section and `math.js` with a `#sum-body` section.
pub fn sample_blocks() -> Vec<Block> {
    vec![
        Block::new("js", "// this is a code block\n<<#greet>>\n\ngreet()"),
        Block::new(
            "js > #greet",
            "function greet() {\n  console.log('hello, world!')\n}",
        ),
        Block::new(" > math.js", "function sum(a, b) {\n<<#sum-body>>\n}"),
        Block::new(" > math.js#sum-body", "  return a + b"),
        Block::new(" > math.js", "console.log(sum(2, 2))"),
    ]
}

/// The same document as [`sample_blocks`], written as markdown.
pub const SAMPLE_MARKDOWN: &str = r#"# Greeting

```js
// this is a code block
<<#greet>>

greet()
```

The greeting itself:

```js > #greet
function greet() {
  console.log('hello, world!')
}
```

# Math

```js > math.js
function sum(a, b) {
<<#sum-body>>
}
```

```js > math.js#sum-body
  return a + b
```

```js > math.js
console.log(sum(2, 2))
```
"#;
