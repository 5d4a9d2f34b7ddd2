use vdf_core::{encode, save_text, write_text, Format, Node, VdfError};

#[test]
fn encode_empty_block() {
    assert_eq!(encode(&Node::new("Empty")), "\"Empty\"\n{\n}\n");
}

#[test]
fn encode_leaves_with_double_tab() {
    let node = Node::new("AppState")
        .with_child(Node::leaf("appid", "440"))
        .with_child(Node::leaf("name", "Team Fortress 2"));
    assert_eq!(
        encode(&node),
        "\"AppState\"\n{\n\t\"appid\"\t\t\"440\"\n\t\"name\"\t\t\"Team Fortress 2\"\n}\n"
    );
}

#[test]
fn encode_nested_indentation() {
    let node = Node::new("a").with_child(
        Node::new("b").with_child(Node::new("c").with_child(Node::leaf("k", "v"))),
    );
    let expected = "\"a\"\n{\n\
                    \t\"b\"\n\t{\n\
                    \t\t\"c\"\n\t\t{\n\
                    \t\t\t\"k\"\t\t\"v\"\n\
                    \t\t}\n\
                    \t}\n\
                    }\n";
    assert_eq!(encode(&node), expected);
}

#[test]
fn encode_keeps_child_order() {
    let node = Node::new("r")
        .with_child(Node::leaf("z", "1"))
        .with_child(Node::new("m"))
        .with_child(Node::leaf("a", "2"));
    assert_eq!(
        encode(&node),
        "\"r\"\n{\n\t\"z\"\t\t\"1\"\n\t\"m\"\n\t{\n\t}\n\t\"a\"\t\t\"2\"\n}\n"
    );
}

#[test]
fn encode_escapes_backslash_then_quote() {
    let node = Node::new("r").with_child(Node::leaf(r#"C:\"x""#, r#"say "hi" \n"#));
    assert_eq!(
        encode(&node),
        "\"r\"\n{\n\t\"C:\\\\\\\"x\\\"\"\t\t\"say \\\"hi\\\" \\\\n\"\n}\n"
    );
}

#[test]
fn encode_control_characters_verbatim() {
    let node = Node::new("r").with_child(Node::leaf("k", "a\tb\nc"));
    assert_eq!(encode(&node), "\"r\"\n{\n\t\"k\"\t\t\"a\tb\nc\"\n}\n");
}

#[test]
fn encode_empty_name_and_value() {
    let node = Node::new("").with_child(Node::leaf("", ""));
    assert_eq!(encode(&node), "\"\"\n{\n\t\"\"\t\t\"\"\n}\n");
}

#[test]
fn write_text_to_buffer() {
    let node = Node::new("r").with_child(Node::leaf("k", "v"));
    let mut buf = Vec::new();
    write_text(&node, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), encode(&node));
}

#[test]
fn save_text_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.vdf");
    let node = Node::new("r").with_child(Node::leaf("k", "v"));
    save_text(&node, &path, Format::Text).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), encode(&node));
}

#[test]
fn save_binary_is_unsupported_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bin");
    let err = save_text(&Node::new("r"), &path, Format::Binary).unwrap_err();
    assert!(matches!(err, VdfError::BinarySerializationUnsupported));
    assert!(!path.exists());
}

#[test]
fn save_text_propagates_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("out.vdf");
    let err = save_text(&Node::new("r"), &path, Format::Text).unwrap_err();
    assert!(matches!(err, VdfError::Io(_)));
}
