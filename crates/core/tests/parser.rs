mod common;

use cmdroute_core::{
    CommandRoute, CommandType, ParseError, ParserOptions, RouteParser, SequenceViolation, Severity,
    Span, codes,
};
use common::{
    STORE, STORE_IGNORE_CASE, inline_options, option_value, parse, parse_err, parse_ok, parse_with,
    store_without_default,
};

const NESTED: &str = "the nested subcommands are not supported. command=";

fn sequence_violation(err: &ParseError) -> (String, SequenceViolation) {
    match err {
        ParseError::InvalidCommandSequence {
            command, violation, ..
        } => (command.clone(), *violation),
        other => panic!("expected InvalidCommandSequence, got {other:?}"),
    }
}

// ─── Hierarchy ──────────────────────────────────────────────────────────────

#[test]
fn explicit_path_with_option() {
    let parsed = parse_ok("root1 grp1 cmd1 --opt1 34");
    assert_eq!(parsed.command.id, "cmd1");
    assert_eq!(parsed.command.name, "command one");
    assert_eq!(option_value(&parsed, "opt1"), "34");

    let h = &parsed.hierarchy;
    assert_eq!(h.ids(), ["root1", "grp1", "cmd1"]);
    assert!(!h.is_default());
    assert_eq!(h.linked_command().id, "root1");
    assert_eq!(h.child_group(0).unwrap().id, "grp1");
    assert!(h.child_subcommand(0).is_none());
    assert_eq!(h.child_subcommand(1).unwrap().id, "cmd1");
    assert_eq!(h.subcommand().unwrap().id, "cmd1");
    assert_eq!(h.leaf().kind, CommandType::SubCommand);
    assert_eq!(h.groups().count(), 1);
    assert_eq!(h.depth(), 3);
}

#[test]
fn nested_groups() {
    let parsed = parse_ok("root1 grp1 grp2 cmd3 /tmp/x");
    assert_eq!(parsed.hierarchy.ids(), ["root1", "grp1", "grp2", "cmd3"]);
    assert_eq!(
        parsed.hierarchy.groups().map(|l| l.id).collect::<Vec<_>>(),
        ["grp1", "grp2"]
    );
    assert_eq!(parsed.command.argument(0).unwrap().value, "/tmp/x");
}

#[test]
fn path_may_end_at_root_or_group() {
    let parsed = parse_ok("root1");
    assert_eq!(parsed.hierarchy.ids(), ["root1"]);
    assert!(parsed.hierarchy.subcommand().is_none());
    assert!(parsed.command.options.is_none());
    assert!(parsed.command.arguments.is_none());

    let parsed = parse_ok("root1 grp3");
    assert_eq!(parsed.hierarchy.leaf().id, "grp3");
    assert_eq!(parsed.hierarchy.leaf().kind, CommandType::Group);
}

#[test]
fn unowned_command_uses_default_root() {
    let parsed = parse_ok("cmd_nr1");
    assert!(parsed.hierarchy.is_default());
    assert_eq!(parsed.hierarchy.linked_command().id, "default");
    assert_eq!(parsed.hierarchy.ids(), ["default", "cmd_nr1"]);
    assert_eq!(parsed.command.id, "cmd_nr1");
}

#[test]
fn command_owned_by_default_root() {
    let implicit = parse_ok("cmd_d1 -v");
    assert!(implicit.hierarchy.is_default());
    assert_eq!(implicit.hierarchy.ids(), ["default", "cmd_d1"]);
    assert_eq!(option_value(&implicit, "verbose"), "True");

    let explicit = parse_ok("default cmd_d1");
    assert!(!explicit.hierarchy.is_default());
    assert_eq!(explicit.hierarchy.ids(), ["default", "cmd_d1"]);
}

#[test]
fn command_found_by_display_name() {
    let parsed = parse_ok("first grp1 cmd1");
    assert_eq!(parsed.hierarchy.ids(), ["root1", "grp1", "cmd1"]);

    // A name containing the separator can never be a single segment.
    let err = parse_err("root1 grp1 command one");
    assert!(matches!(err, ParseError::UnsupportedArguments { .. }), "{err:?}");
}

#[test]
fn unresolved_route_binds_to_default_root() {
    let err = parse_err("unknown 1");
    match err {
        ParseError::UnsupportedArguments {
            command, arguments, ..
        } => {
            assert_eq!(command, "default");
            assert_eq!(arguments, ["unknown", "1"]);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unknown_first_segment_is_an_argument_of_the_default_root() {
    let err = parse_err("nosuch");
    assert_eq!(
        err,
        ParseError::UnsupportedArguments {
            command: "default".into(),
            arguments: vec!["nosuch".into()],
            span: Span::new(0, 6),
        }
    );
    assert_eq!(
        err.to_string(),
        "the command does not support 1 arguments. command=default arguments=nosuch"
    );

    let store = store_without_default();
    let err = RouteParser::new(&store, ParserOptions::default())
        .parse(&CommandRoute::new("r", "nosuch"))
        .unwrap_err();
    assert!(matches!(err, ParseError::InvalidCommandPrefix { ref command, .. } if command == "nosuch"));
}

#[test]
fn no_default_root_rejects_non_root_prefix() {
    let store = store_without_default();
    let parser = RouteParser::new(&store, ParserOptions::default());

    let err = parser
        .parse(&CommandRoute::new("r", "grp1 cmd1"))
        .unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidCommandPrefix {
            command: "grp1".into(),
            span: Span::new(0, 4),
        }
    );
    assert_eq!(err.to_string(), "the command prefix is not valid. command=grp1");
    assert_eq!(err.code(), codes::INVALID_COMMAND_PREFIX);

    let err = parser
        .parse(&CommandRoute::new("r", "--opt1 x"))
        .unwrap_err();
    assert!(matches!(err, ParseError::InvalidCommandPrefix { ref command, .. } if command == "--opt1"));

    assert!(parser.parse(&CommandRoute::new("r", "root1 grp1 cmd2")).is_ok());
}

#[test]
fn subcommand_after_subcommand() {
    let err = parse_err("root1 grp1 cmd1 cmd2");
    assert_eq!(err.to_string(), format!("{NESTED}cmd2"));
    assert_eq!(
        sequence_violation(&err),
        ("cmd2".to_string(), SequenceViolation::NestedSubcommand)
    );
    assert_eq!(err.span(), Some(Span::new(16, 20)));
}

#[test]
fn group_not_owned_by_previous_segment() {
    let err = parse_err("root1 grp2 cmd3");
    assert_eq!(err.to_string(), format!("{NESTED}grp2"));
    assert_eq!(sequence_violation(&err).1, SequenceViolation::OutOfOrder);

    let err = parse_err("root1 cmd1");
    assert_eq!(sequence_violation(&err), ("cmd1".to_string(), SequenceViolation::OutOfOrder));

    // Under the default root only unowned or default-owned commands fit.
    let err = parse_err("grp1 cmd1");
    assert_eq!(sequence_violation(&err), ("grp1".to_string(), SequenceViolation::OutOfOrder));
}

#[test]
fn root_after_first_segment() {
    let err = parse_err("root1 grp1 default");
    assert_eq!(err.to_string(), format!("{NESTED}default"));
    assert_eq!(sequence_violation(&err).1, SequenceViolation::OutOfOrder);
}

#[test]
fn duplicate_segments() {
    let err = parse_err("root1 grp1 grp1 cmd1");
    assert_eq!(err.to_string(), format!("{NESTED}grp1"));
    assert_eq!(sequence_violation(&err).1, SequenceViolation::Duplicate);

    let err = parse_err("root1 root1");
    assert_eq!(sequence_violation(&err), ("root1".to_string(), SequenceViolation::Duplicate));

    let err = parse_err("root1 grp1 cmd1 cmd1");
    assert_eq!(sequence_violation(&err).1, SequenceViolation::Duplicate);
}

#[test]
fn sequence_errors_share_one_code() {
    let ids: Vec<&str> = ["root1 grp1 cmd1 cmd2", "root1 cmd1", "root1 grp1 grp1"]
        .iter()
        .map(|r| parse_err(r).code())
        .collect();
    assert_eq!(ids, [codes::INVALID_COMMAND_SEQUENCE; 3]);
}

// ─── Options ────────────────────────────────────────────────────────────────

#[test]
fn boolean_option_without_value() {
    let parsed = parse_ok("root1 grp1 cmd1 --opt7");
    let options = parsed.command.options.as_ref().unwrap();
    assert_eq!(options["opt7"].value, "True");
    assert!(std::ptr::eq(&options["opt7"], &options["opt7_a"]));
    assert!(std::ptr::eq(
        options.get_by_id("opt7").unwrap(),
        options.get_by_alias("opt7_a").unwrap()
    ));
    assert_eq!(options.len(), 1);
}

#[test]
fn boolean_option_followed_by_option() {
    let parsed = parse_ok("root1 grp1 cmd1 --opt7 --opt1 x");
    assert_eq!(option_value(&parsed, "opt7"), "True");
    assert_eq!(option_value(&parsed, "opt1"), "x");
}

#[test]
fn boolean_option_with_explicit_value() {
    let parsed = parse_ok("root1 grp1 cmd1 -opt7_a false");
    assert_eq!(option_value(&parsed, "opt7"), "false");
}

#[test]
fn alias_binds_same_instance() {
    let parsed = parse_ok("root1 grp1 cmd1 -opt2_a 5");
    let options = parsed.command.options.as_ref().unwrap();
    let by_id = options.get("opt2").unwrap();
    assert_eq!(by_id.value, "5");
    assert_eq!(by_id.alias, Some("opt2_a"));
    assert!(std::ptr::eq(by_id, options.get("opt2_a").unwrap()));
    assert!(options.contains("opt2_a"));
}

#[test]
fn alias_written_with_option_prefix() {
    let err = parse_err("root1 grp1 cmd1 --opt7_a");
    assert_eq!(
        err,
        ParseError::InvalidOptionPrefix {
            option: "opt7_a".into(),
            expected: "-".into(),
            span: Span::new(16, 24),
        }
    );
    assert_eq!(err.code(), codes::INVALID_OPTION_PREFIX);
}

#[test]
fn id_written_with_alias_prefix() {
    let err = parse_err("root1 grp1 cmd1 -opt7");
    assert!(
        matches!(err, ParseError::InvalidOptionPrefix { ref option, ref expected, .. }
            if option == "opt7" && expected == "--"),
        "{err:?}"
    );
    // opt1 declares no alias at all.
    let err = parse_err("root1 grp1 cmd1 -opt1 v");
    assert!(matches!(err, ParseError::InvalidOptionPrefix { .. }), "{err:?}");
}

#[test]
fn unknown_option_and_alias() {
    let err = parse_err("root1 grp1 cmd1 --nope 1");
    assert_eq!(err.to_string(), "the option is not supported. option=nope");
    assert_eq!(err.code(), codes::UNSUPPORTED_OPTION);

    let err = parse_err("root1 grp1 cmd1 -nope 1");
    assert_eq!(err.to_string(), "the option alias is not supported. option=nope");
    assert_eq!(err.code(), codes::UNSUPPORTED_OPTION_ALIAS);

    let err = parse_err("root1 grp1 cmd2 --opt1 x");
    assert!(matches!(err, ParseError::UnsupportedOption { .. }));
}

#[test]
fn aliases_disabled() {
    let opts = ParserOptions {
        option_alias_enabled: false,
        ..ParserOptions::default()
    };
    let err = parse_with("root1 grp1 cmd1 -opt7_a", opts.clone()).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedOptionAlias { .. }), "{err:?}");

    let err = parse_with("root1 grp1 cmd1 --opt7_a", opts.clone()).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedOption { .. }), "{err:?}");

    let parsed = parse_with("root1 grp1 cmd1 --opt7", opts).unwrap();
    let options = parsed.command.options.as_ref().unwrap();
    assert_eq!(options["opt7"].alias, None);
    assert!(options.get("opt7_a").is_none());
}

#[test]
fn repeated_prefix_collapses() {
    let parsed = parse_ok("root1 grp1 cmd1 ---opt1 v");
    assert_eq!(option_value(&parsed, "opt1"), "v");
}

#[test]
fn option_value_spans_plain_tokens() {
    let parsed = parse_ok("root1 grp1 cmd1 --opt1 hello   world --opt2 5");
    assert_eq!(option_value(&parsed, "opt1"), "hello world");
    assert_eq!(option_value(&parsed, "opt2"), "5");
    assert!(parsed.command.arguments.as_ref().unwrap().is_empty());
}

#[test]
fn quoted_option_value_keeps_separators() {
    let parsed = parse_ok(r#"root1 grp1 cmd1 --opt1 "hello   world""#);
    assert_eq!(option_value(&parsed, "opt1"), "hello   world");
}

#[test]
fn nested_delimiters_split_literally() {
    let parsed = parse_ok(r#"root1 grp1 cmd1 --opt1 "val1 "nested val" val2""#);
    assert_eq!(option_value(&parsed, "opt1"), "val1  nested val  val2");
}

#[test]
fn duplicate_option() {
    let err = parse_err("root1 grp1 cmd1 --opt7 -opt7_a");
    assert_eq!(err.to_string(), "the option is already specified. option=opt7");
    assert_eq!(err.span(), Some(Span::new(23, 30)));

    let err = parse_err("root1 grp1 cmd1 --opt1 a --opt1 b");
    assert!(matches!(err, ParseError::DuplicateOption { .. }));
}

#[test]
fn missing_option_value() {
    let err = parse_err("root1 grp1 cmd1 --opt1");
    assert_eq!(err.to_string(), "the option value is missing. option=opt1");
    assert_eq!(err.code(), codes::MISSING_OPTION_VALUE);

    let err = parse_err("root1 grp1 cmd1 --opt1 --opt7");
    assert!(matches!(err, ParseError::MissingOptionValue { ref option, .. } if option == "opt1"));
}

#[test]
fn option_without_value_takes_default() {
    let parsed = parse_ok("root1 grp1 cmd1 -o3");
    let opt3 = parsed.command.option("opt3").unwrap();
    assert_eq!(opt3.value, "def3");
    assert!(!opt3.defaulted);

    let opts = ParserOptions {
        default_option_value_enabled: false,
        ..ParserOptions::default()
    };
    let err = parse_with("root1 grp1 cmd1 --opt3", opts).unwrap_err();
    assert!(matches!(err, ParseError::MissingOptionValue { .. }));
}

#[test]
fn omitted_options_with_defaults() {
    let parsed = parse_ok("root1 grp1 cmd1");
    assert!(parsed.command.options.as_ref().unwrap().is_empty());

    let opts = ParserOptions {
        default_option_enabled: true,
        ..ParserOptions::default()
    };
    let parsed = parse_with("root1 grp1 cmd1 --opt1 x", opts.clone()).unwrap();
    let options = parsed.command.options.as_ref().unwrap();
    assert_eq!(options.len(), 2);
    assert!(options["o3"].defaulted);
    assert_eq!(options["opt3"].value, "def3");
    assert!(!options["opt1"].defaulted);

    let parsed = parse_with("root1 grp1 cmd1 --opt3 given", opts).unwrap();
    assert_eq!(option_value(&parsed, "opt3"), "given");
    assert!(!parsed.command.option("opt3").unwrap().defaulted);
}

#[test]
fn obsolete_option_and_command_still_bind() {
    let parsed = parse_ok("root1 grp1 cmd1 --opt8 old");
    assert_eq!(option_value(&parsed, "opt8"), "old");
    assert!(parse("cmd_d1").is_ok());
}

#[test]
fn flagged_usage_produces_warnings() {
    let parsed = parse_ok("root1 grp1 cmd1 --opt8 old --opt1 34");
    let warnings = parsed.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].id, codes::FLAGGED_OPTION);
    assert_eq!(warnings[0].severity, Severity::Warn);
    assert_eq!(warnings[0].message, "the option is obsolete. option=opt8");
    assert!(warnings[0].span.is_none());
    let context = warnings[0].context.as_ref().unwrap();
    assert_eq!(context["command"], "cmd1");
    assert_eq!(context["flag"], "obsolete");

    let warnings = parse_ok("cmd_d1").warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].id, codes::FLAGGED_COMMAND);
    assert_eq!(warnings[0].message, "the command is obsolete. command=cmd_d1");

    assert!(parse_ok("root1 grp1 cmd1 --opt1 34").warnings().is_empty());
}

#[test]
#[should_panic(expected = "no option bound under 'opt2'")]
fn indexing_missing_option_panics() {
    let parsed = parse_ok("root1 grp1 cmd1 --opt1 x");
    let _ = &parsed.command.options.as_ref().unwrap()["opt2"];
}

// ─── Inline values ──────────────────────────────────────────────────────────

#[test]
fn inline_value_then_positional() {
    let parsed = parse_with("root1 grp1 cmd1 --opt1=34 5", inline_options()).unwrap();
    assert_eq!(option_value(&parsed, "opt1"), "34");
    let args = parsed.command.arguments.as_ref().unwrap();
    assert_eq!(args[0].value, "5");
    assert_eq!(args[0].id, "arg1");
}

#[test]
fn inline_quoted_and_boolean_values() {
    let parsed = parse_with(
        r#"root1 grp1 cmd1 --opt1="a  b" -opt7_a=false"#,
        inline_options(),
    )
    .unwrap();
    assert_eq!(option_value(&parsed, "opt1"), "a  b");
    assert_eq!(option_value(&parsed, "opt7"), "false");
}

#[test]
fn inline_empty_value() {
    let err = parse_with("root1 grp1 cmd1 --opt1=", inline_options()).unwrap_err();
    assert!(matches!(err, ParseError::MissingOptionValue { .. }), "{err:?}");

    let parsed = parse_with("root1 grp1 cmd1 --opt3= --opt1=\"\"", inline_options()).unwrap();
    assert_eq!(option_value(&parsed, "opt3"), "def3");
    assert_eq!(option_value(&parsed, "opt1"), "");
}

#[test]
fn inline_unterminated_value() {
    let err = parse_with(r#"root1 grp1 cmd1 --opt1="abc"#, inline_options()).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnterminatedOptionValue {
            option: "opt1".into(),
            fragment: "\"abc".into(),
            span: Span::new(23, 27),
        }
    );
}

// ─── Arguments ──────────────────────────────────────────────────────────────

#[test]
fn positional_arguments_in_order() {
    let parsed = parse_ok(r#"root1 grp1 cmd1 32 "arg2 value" --opt1 v"#);
    let args = parsed.command.arguments.as_ref().unwrap();
    assert_eq!(args.len(), 2);
    assert_eq!(args[0].value, "32");
    assert_eq!(args[1].value, "arg2 value");
    assert_eq!(args[1].position, 1);
    assert_eq!(args.get_by_id("arg2").unwrap().value, "arg2 value");
    assert!(args[0].descriptor.required);
    assert_eq!(option_value(&parsed, "opt1"), "v");
}

#[test]
fn argument_count_boundary() {
    let parsed = parse_ok("root1 grp1 cmd1 a b");
    assert_eq!(parsed.command.arguments.as_ref().unwrap().len(), 2);

    let err = parse_err("root1 grp1 cmd1 a b c");
    assert_eq!(
        err,
        ParseError::UnsupportedArguments {
            command: "cmd1".into(),
            arguments: vec!["a".into(), "b".into(), "c".into()],
            span: Span::new(16, 21),
        }
    );
    assert_eq!(
        err.to_string(),
        "the command does not support 3 arguments. command=cmd1 arguments=a,b,c"
    );
}

#[test]
fn command_without_declarations() {
    let parsed = parse_ok("root1 grp1 cmd2");
    assert!(parsed.command.options.is_none());
    assert!(parsed.command.arguments.is_none());

    let err = parse_err("root1 grp1 cmd2 x");
    assert!(
        matches!(err, ParseError::UnsupportedArguments { ref arguments, .. } if arguments == &["x"])
    );
}

#[test]
fn unterminated_argument() {
    let route = r#"root1 grp1 cmd1 32 "arg2 value..."#;
    let err = parse_err(route);
    assert_eq!(
        err,
        ParseError::UnterminatedArgument {
            fragment: "\"arg2 value...".into(),
            span: Span::new(19, route.len()),
        }
    );
    assert_eq!(
        err.to_string(),
        "the argument value is missing the closing delimiter. argument=\"arg2 value..."
    );
}

#[test]
fn unterminated_option_value() {
    let err = parse_err(r#"root1 grp1 cmd1 --opt1 "abc def"#);
    assert!(
        matches!(err, ParseError::UnterminatedOptionValue { ref option, ref fragment, .. }
            if option == "opt1" && fragment == "\"abc def"),
        "{err:?}"
    );
}

// ─── Route-level ────────────────────────────────────────────────────────────

#[test]
fn empty_route() {
    let parser = RouteParser::new(&STORE, ParserOptions::default());
    for raw in ["", "   ", "\t \n"] {
        let err = parser.parse(&CommandRoute::new("r-1", raw)).unwrap_err();
        assert_eq!(err, ParseError::EmptyRoute { route: "r-1".into() });
        assert_eq!(err.span(), None);
    }

    let opts = ParserOptions {
        separator: ',',
        ..ParserOptions::default()
    };
    let err = parse_with(",,,", opts).unwrap_err();
    assert!(matches!(err, ParseError::EmptyRoute { .. }));
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let err = parse_err("   root1 grp1 cmd1 cmd2  ");
    assert_eq!(err.span(), Some(Span::new(16, 20)));
}

#[test]
fn custom_separator_and_prefixes() {
    let opts = ParserOptions {
        separator: ',',
        option_prefix: "/".into(),
        option_alias_prefix: "+".into(),
        value_delimiter: Some('\''),
        ..ParserOptions::default()
    };
    let parsed = parse_with("root1,grp1,cmd1,,/opt1,'a, b',+opt7_a", opts).unwrap();
    assert_eq!(option_value(&parsed, "opt1"), "a, b");
    assert_eq!(option_value(&parsed, "opt7"), "True");
}

#[test]
fn case_sensitive_text_handler() {
    // ROOT1 does not resolve, so the whole route binds to the default root.
    let err = parse_err("ROOT1 grp1 cmd1");
    assert!(
        matches!(err, ParseError::UnsupportedArguments { ref command, .. } if command == "default"),
        "{err:?}"
    );
    let err = parse_err("root1 grp1 cmd1 --OPT1 x");
    assert!(matches!(err, ParseError::UnsupportedOption { .. }));
}

#[test]
fn case_insensitive_text_handler() {
    let parser = RouteParser::new(&STORE_IGNORE_CASE, ParserOptions::default());
    let parsed = parser
        .parse(&CommandRoute::new("ci", "ROOT1 Grp1 CMD1 --OPT1 34 -OPT7_A"))
        .unwrap();
    assert_eq!(parsed.command.id, "cmd1");
    assert_eq!(parsed.hierarchy.ids(), ["root1", "grp1", "cmd1"]);
    let options = parsed.command.options.as_ref().unwrap();
    assert_eq!(options["opt1"].value, "34");
    assert_eq!(options["Opt1"].value, "34");
    assert!(std::ptr::eq(&options["OPT7"], &options["opt7_a"]));
}

#[test]
fn hindi_route() {
    let parsed = parse_ok("यूनिकोड परीक्षण प्रिंट तर्क१ -ए मान");
    assert_eq!(parsed.hierarchy.ids(), ["यूनिकोड", "परीक्षण", "प्रिंट"]);
    let options = parsed.command.options.as_ref().unwrap();
    assert_eq!(options["एक"].value, "मान");
    assert!(std::ptr::eq(&options["एक"], &options["ए"]));
    assert_eq!(parsed.command.argument(0).unwrap().value, "तर्क१");

    let err = parse_err("यूनिकोड परीक्षण प्रिंट --ए मान");
    assert!(matches!(err, ParseError::InvalidOptionPrefix { .. }), "{err:?}");
}

#[test]
fn chinese_route() {
    let parsed = parse_ok("统一码 测试 打印 值 --选项 中文 文本");
    assert_eq!(parsed.command.id, "打印");
    assert_eq!(option_value(&parsed, "选"), "中文 文本");
    assert_eq!(parsed.command.argument(0).unwrap().value, "值");

    let err = parse_err("统一码 测试 打印 打印");
    assert_eq!(err.to_string(), format!("{NESTED}打印"));
}

#[test]
fn parsed_command_serializes() {
    let parsed = parse_ok("cmd_nr1 -n alice");
    let json = serde_json::to_value(&parsed).unwrap();
    assert_eq!(json["command"]["id"], "cmd_nr1");
    assert_eq!(json["command"]["options"][0]["id"], "name");
    assert_eq!(json["command"]["options"][0]["alias"], "n");
    assert_eq!(json["command"]["options"][0]["value"], "alice");
    assert!(json["command"]["arguments"].is_null());
    assert_eq!(json["hierarchy"]["links"][0]["id"], "default");
    assert_eq!(json["hierarchy"]["links"][0]["is_default"], true);
    assert_eq!(json["hierarchy"]["links"][1]["kind"], "subcommand");
}

#[test]
fn error_converts_to_diagnostic() {
    let err = parse_err("root1 grp1 cmd1 cmd2");
    let diag = err.to_diagnostic();
    assert_eq!(diag.id, codes::INVALID_COMMAND_SEQUENCE);
    assert_eq!(diag.span, Some(Span::new(16, 20)));
    let ctx = diag.context.unwrap();
    assert_eq!(ctx["command"], "cmd2");
    assert_eq!(ctx["violation"], "nested_subcommand");
}

// ─── Concurrency ────────────────────────────────────────────────────────────

#[test]
fn parser_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RouteParser<'static>>();
}

#[test]
fn concurrent_parses_share_one_store() {
    let parser = RouteParser::new(&STORE, ParserOptions::default());
    let routes = [
        ("root1 grp1 cmd1 --opt1 34", "cmd1"),
        ("cmd_nr1 --name x", "cmd_nr1"),
        ("root1 grp1 grp2 cmd3 p", "cmd3"),
        ("统一码 测试 打印 --选项 v", "打印"),
    ];
    std::thread::scope(|s| {
        for t in 0..8 {
            let parser = &parser;
            s.spawn(move || {
                for i in 0..200 {
                    let (raw, expected) = routes[(t + i) % routes.len()];
                    let route = CommandRoute::new(format!("{t}-{i}"), raw);
                    let parsed = parser.parse(&route).unwrap();
                    assert_eq!(parsed.command.id, expected);
                    assert!(parse("root1 grp1 cmd1 cmd2").is_err());
                }
            });
        }
    });
}
