//! Command scenarios written with selection markers: `<` is the selection
//! start and `>` the selection end, both as char offsets into the unmarked
//! text.

use mark_lib::{
  Command, Config, Engine,
  engine::apply,
  markers::{format as mark, parse},
};

#[track_caller]
fn check(command: Command, input: &str, expected: &str) {
  let (text, start, end) = parse(input);
  let result = apply(command, &text, start, end).unwrap();
  assert_eq!(
    mark(&result.text, result.selection_start, result.selection_end),
    expected,
    "{command} on {input:?}"
  );
}

#[test]
fn marker_notation() {
  assert_eq!(parse("a<bc>d"), ("abcd".into(), 1, 3));
  assert_eq!(mark("abcd", 1, 3), "a<bc>d");
  assert_eq!(mark("ab", 2, 2), "ab<>");
}

#[test]
fn bold() {
  check(Command::Bold, "<>", "**<bold>**");
  check(Command::Bold, "<some> string", "**<some>** string");
  check(Command::Bold, "**<some>** string", "<some> string");
  check(
    Command::Bold,
    "some information\nsome <important> information",
    "some information\nsome **<important>** information",
  );
}

#[test]
fn bold_stops_at_first_line_break() {
  check(
    Command::Bold,
    "<some information\nsome important information>",
    "**<some information>**\nsome important information",
  );
}

#[test]
fn code_inline() {
  check(
    Command::CodeInline,
    "<print('hello, world')>",
    "`<print('hello, world')>`",
  );
  check(Command::CodeInline, "x <>", "x `<code>`");
  check(Command::CodeInline, "`<x>`", "<x>");
}

#[test]
fn code_block() {
  check(
    Command::CodeBlock,
    "<def main():\n    print('hello, world')\n    return 'multiline'>",
    "```\n<def main():\n    print('hello, world')\n    return 'multiline'>\n```",
  );
  check(
    Command::CodeBlock,
    "```\n<def main():\n    print('hello, world')\n    return 'multiline'>\n```",
    "<def main():\n    print('hello, world')\n    return 'multiline'>",
  );
}

#[test]
fn indent() {
  check(Command::Indent, "some<>", "some    <>");
  check(Command::Indent, "some<> content", "some    <> content");
  check(
    Command::Indent,
    "some <selected> content",
    "    some <selected> content",
  );
}

#[test]
fn unindent() {
  check(Command::Unindent, "    some content<>", "some content<>");
  check(
    Command::Unindent,
    " some <selected> content",
    "some <selected> content",
  );
  check(Command::Unindent, "<    a\n  b\nc>", "<a\nb\nc>");
}

#[test]
fn indent_lists() {
  check(
    Command::Indent,
    "- option 1\n- option 2\n- <>",
    "- option 1\n- option 2\n    - <>",
  );
  check(
    Command::Indent,
    "1. option 1\n2. option 2\n3. <>",
    "1. option 1\n2. option 2\n    2.1. <>",
  );
  check(
    Command::Indent,
    "1. option 1\n2. option 2\n    2.1. <>",
    "1. option 1\n2. option 2\n    2.1.     <>",
  );
  check(
    Command::Unindent,
    "1. option 1\n2. option 2\n    2.1. content<>",
    "1. option 1\n2. option 2\n3. content<>",
  );
}

#[test]
fn nested_list_siblings_shift() {
  check(
    Command::Indent,
    "1. a\n2. b<>\n3. c",
    "1. a\n    1.1. b<>\n2. c",
  );
  check(
    Command::Unindent,
    "1. a\n    1.1. b<>\n    1.2. c\n2. d",
    "1. a\n2. b<>\n    2.1. c\n3. d",
  );
}

#[test]
fn headings() {
  check(
    Command::Heading(1),
    "some content before\nheadline level 1<>\nsome content after",
    "some content before\n# headline level 1<>\nsome content after",
  );
  check(
    Command::Heading(6),
    "some content before\nheadline level 6<>\nsome content after",
    "some content before\n###### headline level 6<>\nsome content after",
  );
  check(
    Command::Heading(6),
    "some content before\n# headline<>\nsome content after",
    "some content before\n###### headline<>\nsome content after",
  );
  check(Command::Heading(1), "###### some title<>", "# some title<>");
  check(Command::Heading(1), "# some title<>", "some title<>");
}

#[test]
fn lists() {
  check(Command::OrderedList, "some item<>", "1. some item<>");
  check(Command::OrderedList, "1. some item<>", "some item<>");
  check(Command::UnorderedList, "<a\nb>", "- <a\n- b>");
  check(Command::UnorderedList, "- a<>", "a<>");
  check(
    Command::OrderedList,
    "1. a\n2. b\n<c>\n3. d",
    "1. a\n2. b\n3. <c>\n4. d",
  );
}

#[test]
fn templates() {
  check(Command::Link, "some text <>", "some text [<example>](url)");
  check(Command::Link, "<docs>", "[docs](<url>)");
  check(Command::Image, "some text <>", "some text ![image](<image.png>)");
}

#[test]
fn list_continuation() {
  check(
    Command::NewLine,
    "1. option 1\n2. option 2\n3. option 3<>",
    "1. option 1\n2. option 2\n3. option 3\n4. <>",
  );
  check(
    Command::NewLine,
    "- option 1\n- option 2\n- option 3<>",
    "- option 1\n- option 2\n- option 3\n- <>",
  );
  check(Command::NewLine, "1. a\n2. <>", "1. a\n<>");
}

#[test]
fn configured_placeholders() {
  let config = Config::from_toml(
    r#"
    [placeholders]
    bold = "strong"
    link-url = "https://"
    [indent]
    width = 2
    "#,
  )
  .unwrap();
  let engine = Engine::new(config);

  let result = engine.apply(Command::Bold, "", 0, 0).unwrap();
  assert_eq!(mark(&result.text, result.selection_start, result.selection_end), "**<strong>**");

  let result = engine.apply(Command::Link, "x", 0, 1).unwrap();
  assert_eq!(mark(&result.text, result.selection_start, result.selection_end), "[x](<https://>)");

  let (text, start, end) = parse("1. a\n2. b<>");
  let result = engine.apply(Command::Indent, &text, start, end).unwrap();
  assert_eq!(result.text, "1. a\n  1.1. b");
}
