use hjson::{hjson, parse, parse_with_options, Error, ParseOptions, Value};

#[test]
fn json_is_accepted() {
    let doc = parse(r#"{"a": 1, "b": [true, null], "c": "text"}"#).unwrap();
    assert_eq!(doc.value, hjson!({"a": 1, "b": [true, null], "c": "text"}));
}

#[test]
fn commas_are_optional() {
    let doc = parse("{\n  a: 1\n  b: 2\n}").unwrap();
    assert_eq!(doc.value, hjson!({"a": 1, "b": 2}));

    let doc = parse("[\n  1\n  2\n  3\n]").unwrap();
    assert_eq!(doc.value, hjson!([1, 2, 3]));
}

#[test]
fn braceless_root_object() {
    let doc = parse("host: localhost\nport: 8080").unwrap();
    assert_eq!(doc.value, hjson!({"host": "localhost", "port": 8080}));
}

#[test]
fn root_scalars() {
    assert_eq!(parse("true").unwrap().value, Value::Bool(true));
    assert_eq!(parse("3.5").unwrap().value, Value::Number(3.5));
    assert_eq!(parse("\"quoted\"").unwrap().value, hjson!("quoted"));
    assert_eq!(parse("plain text").unwrap().value, hjson!("plain text"));
}

#[test]
fn quoteless_string_runs_to_end_of_line() {
    let doc = parse("a: Hello, World! # not a comment").unwrap();
    assert_eq!(doc.value, hjson!({"a": "Hello, World! # not a comment"}));

    let doc = parse("path: C:\\temp").unwrap();
    assert_eq!(doc.value, hjson!({"path": "C:\\temp"}));
}

#[test]
fn keyword_and_number_boundaries() {
    let doc = parse("{a: true, b: 3, c: true dat, d: 3 dogs}").unwrap();
    assert_eq!(
        doc.value,
        hjson!({"a": true, "b": 3, "c": "true dat", "d": "3 dogs"})
    );
}

#[test]
fn number_recognized_before_comment() {
    let doc = parse("a: 5 // fine").unwrap();
    assert_eq!(doc.value, hjson!({"a": 5}));
    let doc = parse("a: 5 miles // still a string").unwrap();
    assert_eq!(doc.value, hjson!({"a": "5 miles // still a string"}));
}

#[test]
fn comments_are_whitespace() {
    let text = "
    # hash
    // slash
    /* block
       spanning */
    {
      a: 1 # trailing
      /* gap */ b: 2
    }";
    let doc = parse(text).unwrap();
    assert_eq!(doc.value, hjson!({"a": 1, "b": 2}));
}

#[test]
fn multiline_string_strips_indent() {
    let doc = parse("key: '''\n  line1\n  line2\n  '''").unwrap();
    assert_eq!(doc.value, hjson!({"key": "line1\nline2"}));
}

#[test]
fn multiline_string_keeps_deeper_indent() {
    let doc = parse("key:\n  '''\n  first\n    nested\n  '''").unwrap();
    assert_eq!(doc.value, hjson!({"key": "first\n  nested"}));
}

#[test]
fn multiline_string_is_verbatim() {
    let doc = parse("key: '''\n  no \\n escapes\n  '''").unwrap();
    assert_eq!(doc.value, hjson!({"key": "no \\n escapes"}));
}

#[test]
fn quoted_string_escapes() {
    let doc = parse(r#"{a: "tab\there", b: "\u0041\u00e9", c: "\ud83d\ude00"}"#).unwrap();
    assert_eq!(
        doc.value,
        hjson!({"a": "tab\there", "b": "A\u{e9}", "c": "\u{1f600}"})
    );
}

#[test]
fn duplicate_keys_keep_last_value_at_last_position() {
    let doc = parse("{a: 1, b: 2, a: 3}").unwrap();
    let obj = doc.value.as_object().unwrap();
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(obj.get("a"), Some(&Value::Number(3.0)));
}

#[test]
fn unterminated_object_fails() {
    let err = parse("{a:1").unwrap_err();
    match err {
        Error::Syntax { ref msg, line, .. } => {
            assert!(msg.contains("'}'"), "unexpected message: {msg}");
            assert_eq!(line, 1);
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn missing_colon_fails() {
    assert!(parse("{a 1}").is_err());
    assert!(parse("{: 1}").is_err());
}

#[test]
fn trailing_characters_fail() {
    assert!(parse("[1] extra").is_err());
    assert!(parse("{a: 1} {b: 2}").is_err());
}

#[test]
fn error_positions_point_at_the_fault() {
    let err = parse("{\n  a: 1\n  b]: 2\n}").unwrap_err();
    let (line, col) = err.position().unwrap();
    assert_eq!(line, 3);
    assert!(col >= 3);
}

#[test]
fn brace_in_string_produces_hint() {
    let err = parse("{a: text with } inside\nb: 1").unwrap_err();
    let hint = err.hint().unwrap();
    assert!(hint.contains("unquoted strings"), "hint was: {hint}");
}

#[test]
fn depth_limit_is_configurable() {
    let deep = format!("{}1{}", "[".repeat(40), "]".repeat(40));
    assert!(parse(&deep).is_ok());

    let opts = ParseOptions::new().with_max_depth(8);
    let err = parse_with_options(&deep, &opts).unwrap_err();
    match err {
        Error::Syntax { ref msg, .. } => assert!(msg.contains("depth"), "message: {msg}"),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn empty_input_is_an_empty_object() {
    assert_eq!(parse("").unwrap().value, hjson!({}));
    assert_eq!(parse("   \n  # only a comment\n").unwrap().value, hjson!({}));
}

#[test]
fn whitespace_in_key_fails() {
    assert!(parse("{a key: 1}").is_err());
}

#[test]
fn nested_structures() {
    let text = "
    servers:
    [
      {
        name: alpha
        port: 1000
      }
      {
        name: beta
        port: 1001
      }
    ]
    default: alpha
    ";
    let doc = parse(text).unwrap();
    assert_eq!(
        doc.value,
        hjson!({
            "servers": [
                {"name": "alpha", "port": 1000},
                {"name": "beta", "port": 1001}
            ],
            "default": "alpha"
        })
    );
}
