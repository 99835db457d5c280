use pretty_assertions::assert_eq;

use super::*;

/// Helper: scan a whole source string with the built-in keywords.
fn scan(source: &str) -> Vec<Token> {
    Scanner::new(source, KeywordSet::terramate()).collect()
}

/// Helper: scan and return tags only.
fn scan_tags(source: &str) -> Vec<Tag> {
    scan(source).iter().map(|t| t.tag).collect()
}

/// Helper: scan and pair each tag with its source text.
fn scan_texts(source: &str) -> Vec<(Tag, &str)> {
    scan(source)
        .iter()
        .map(|t| (t.tag, t.text(source)))
        .collect()
}

/// Helper: scan and return token texts only.
fn scan_strs(source: &str) -> Vec<&str> {
    scan_texts(source).into_iter().map(|(_, t)| t).collect()
}

fn tok(tag: Tag, start: u32, end: u32) -> Token {
    Token::new(tag, start, end)
}

// ─── Classification Scenarios ──────────────────────────────────

#[test]
fn comment_then_stack_block() {
    assert_eq!(
        scan("# a comment\nstack {"),
        vec![
            tok(Tag::LineComment, 0, 11),
            tok(Tag::Whitespace, 11, 12),
            tok(Tag::Keyword, 12, 17),
            tok(Tag::Whitespace, 17, 18),
            tok(Tag::LBrace, 18, 19),
        ]
    );
}

#[test]
fn multi_dot_number_is_one_token() {
    assert_eq!(scan("1.2.3"), vec![tok(Tag::Number, 0, 5)]);
}

#[test]
fn escaped_quote_does_not_end_string() {
    let source = r#""ab\"cd""#;
    assert_eq!(scan(source), vec![tok(Tag::String, 0, 8)]);
}

#[test]
fn equality_expression() {
    assert_eq!(
        scan("a == b"),
        vec![
            tok(Tag::Identifier, 0, 1),
            tok(Tag::Whitespace, 1, 2),
            tok(Tag::Operator, 2, 4),
            tok(Tag::Whitespace, 4, 5),
            tok(Tag::Identifier, 5, 6),
        ]
    );
}

#[test]
fn hyphenated_identifier_is_one_token() {
    assert_eq!(scan("x-y"), vec![tok(Tag::Identifier, 0, 3)]);
}

#[test]
fn unterminated_block_comment_runs_to_end() {
    assert_eq!(scan("/* unterminated"), vec![tok(Tag::BlockComment, 0, 15)]);
}

// ─── Whitespace ────────────────────────────────────────────────

#[test]
fn whitespace_run_includes_newlines() {
    assert_eq!(
        scan(" \t\n\r\n x"),
        vec![tok(Tag::Whitespace, 0, 6), tok(Tag::Identifier, 6, 7)]
    );
}

#[test]
fn unicode_whitespace() {
    // U+2003 EM SPACE, U+00A0 NO-BREAK SPACE
    assert_eq!(scan_tags("a\u{2003}\u{a0}b"), vec![
        Tag::Identifier,
        Tag::Whitespace,
        Tag::Identifier
    ]);
}

#[test]
fn empty_source() {
    assert!(scan("").is_empty());
}

// ─── Comments ──────────────────────────────────────────────────

#[test]
fn hash_comment_stops_before_newline() {
    assert_eq!(
        scan_texts("# hi\nx"),
        vec![
            (Tag::LineComment, "# hi"),
            (Tag::Whitespace, "\n"),
            (Tag::Identifier, "x"),
        ]
    );
}

#[test]
fn hash_comment_at_end_of_input() {
    assert_eq!(scan("#"), vec![tok(Tag::LineComment, 0, 1)]);
}

#[test]
fn slash_slash_comment() {
    assert_eq!(
        scan_texts("x // note\ny"),
        vec![
            (Tag::Identifier, "x"),
            (Tag::Whitespace, " "),
            (Tag::LineComment, "// note"),
            (Tag::Whitespace, "\n"),
            (Tag::Identifier, "y"),
        ]
    );
}

#[test]
fn line_comment_keeps_carriage_return() {
    assert_eq!(
        scan_texts("# crlf\r\n"),
        vec![(Tag::LineComment, "# crlf\r"), (Tag::Whitespace, "\n")]
    );
}

#[test]
fn block_comment_terminated() {
    assert_eq!(
        scan("/* a */x"),
        vec![tok(Tag::BlockComment, 0, 7), tok(Tag::Identifier, 7, 8)]
    );
}

#[test]
fn block_comment_spans_lines() {
    assert_eq!(
        scan_texts("/* a\n * b\n */ x"),
        vec![
            (Tag::BlockComment, "/* a\n * b\n */"),
            (Tag::Whitespace, " "),
            (Tag::Identifier, "x"),
        ]
    );
}

#[test]
fn block_comment_ends_at_first_terminator() {
    assert_eq!(
        scan_texts("/* a */ b */"),
        vec![
            (Tag::BlockComment, "/* a */"),
            (Tag::Whitespace, " "),
            (Tag::Identifier, "b"),
            (Tag::Whitespace, " "),
            (Tag::Operator, "*"),
            (Tag::Operator, "/"),
        ]
    );
}

#[test]
fn empty_block_comment() {
    assert_eq!(scan("/**/"), vec![tok(Tag::BlockComment, 0, 4)]);
}

#[test]
fn opener_star_does_not_close_comment() {
    assert_eq!(scan("/*/"), vec![tok(Tag::BlockComment, 0, 3)]);
}

#[test]
fn bare_slash_is_operator() {
    assert_eq!(
        scan_texts("a / b"),
        vec![
            (Tag::Identifier, "a"),
            (Tag::Whitespace, " "),
            (Tag::Operator, "/"),
            (Tag::Whitespace, " "),
            (Tag::Identifier, "b"),
        ]
    );
}

#[test]
fn trailing_slash_is_operator() {
    assert_eq!(
        scan("a/"),
        vec![tok(Tag::Identifier, 0, 1), tok(Tag::Operator, 1, 2)]
    );
}

// ─── Strings ───────────────────────────────────────────────────

#[test]
fn simple_string() {
    assert_eq!(scan(r#""abc""#), vec![tok(Tag::String, 0, 5)]);
}

#[test]
fn empty_string() {
    assert_eq!(scan(r#""""#), vec![tok(Tag::String, 0, 2)]);
}

#[test]
fn unterminated_string_runs_to_end() {
    assert_eq!(scan(r#""abc"#), vec![tok(Tag::String, 0, 4)]);
}

#[test]
fn newline_does_not_terminate_string() {
    assert_eq!(scan("\"a\nb\""), vec![tok(Tag::String, 0, 5)]);
}

#[test]
fn trailing_backslash_in_unterminated_string() {
    assert_eq!(scan(r#""ab\"#), vec![tok(Tag::String, 0, 4)]);
}

#[test]
fn escaped_backslash_then_closing_quote() {
    assert_eq!(
        scan_texts(r#""a\\" x"#),
        vec![
            (Tag::String, r#""a\\""#),
            (Tag::Whitespace, " "),
            (Tag::Identifier, "x"),
        ]
    );
}

#[test]
fn escaped_multibyte_character() {
    let source = "\"\\\u{e9}\"";
    assert_eq!(scan(source), vec![tok(Tag::String, 0, 5)]);
}

#[test]
fn adjacent_strings() {
    assert_eq!(
        scan_texts(r#""a""b""#),
        vec![(Tag::String, r#""a""#), (Tag::String, r#""b""#)]
    );
}

#[test]
fn interpolation_stays_inside_string() {
    assert_eq!(
        scan_tags(r#""${global.name}-${terramate.stack.id}""#),
        vec![Tag::String]
    );
}

// ─── Numbers ───────────────────────────────────────────────────

#[test]
fn integer_and_decimal() {
    assert_eq!(scan_texts("42"), vec![(Tag::Number, "42")]);
    assert_eq!(scan_texts("3.14"), vec![(Tag::Number, "3.14")]);
}

#[test]
fn exponents() {
    for source in ["1e10", "1E+5", "2e-3", "6.02e23"] {
        assert_eq!(scan_texts(source), vec![(Tag::Number, source)], "{source}");
    }
}

#[test]
fn bare_exponent_marker_is_consumed() {
    assert_eq!(scan("1e"), vec![tok(Tag::Number, 0, 2)]);
    assert_eq!(scan("1e+"), vec![tok(Tag::Number, 0, 3)]);
}

#[test]
fn exponent_then_identifier() {
    assert_eq!(
        scan_texts("1ex"),
        vec![(Tag::Number, "1e"), (Tag::Identifier, "x")]
    );
}

#[test]
fn dots_are_greedy_inside_numbers() {
    assert_eq!(scan_texts("0..5"), vec![(Tag::Number, "0..5")]);
    assert_eq!(scan_texts("1.2.3e4"), vec![(Tag::Number, "1.2.3e4")]);
}

#[test]
fn number_then_identifier() {
    assert_eq!(
        scan_texts("12abc"),
        vec![(Tag::Number, "12"), (Tag::Identifier, "abc")]
    );
}

#[test]
fn non_ascii_decimal_digits_form_numbers() {
    // Arabic-Indic three, two
    assert_eq!(scan("\u{663}\u{662}"), vec![tok(Tag::Number, 0, 4)]);
    assert_eq!(scan_texts("1\u{663}.5"), vec![(Tag::Number, "1\u{663}.5")]);
    assert_eq!(scan_texts("1e\u{967}"), vec![(Tag::Number, "1e\u{967}")]);
}

#[test]
fn superscript_digit_is_not_a_number() {
    assert_eq!(
        scan_texts("2\u{b2}"),
        vec![(Tag::Number, "2"), (Tag::BadCharacter, "\u{b2}")]
    );
}

#[test]
fn leading_dot_is_operator() {
    assert_eq!(
        scan_texts(".5"),
        vec![(Tag::Operator, "."), (Tag::Number, "5")]
    );
}

// ─── Delimiters ────────────────────────────────────────────────

#[test]
fn delimiters() {
    assert_eq!(
        scan_tags("{}[]()"),
        vec![
            Tag::LBrace,
            Tag::RBrace,
            Tag::LBrack,
            Tag::RBrack,
            Tag::LParen,
            Tag::RParen,
        ]
    );
}

// ─── Operators ─────────────────────────────────────────────────

#[test]
fn compound_operators() {
    for op in ["==", "!=", "<=", ">=", "&&", "||", "..", "..."] {
        assert_eq!(scan_texts(op), vec![(Tag::Operator, op)], "{op}");
    }
}

#[test]
fn single_char_operators() {
    let source = "=!<>+-*%&|:?.";
    let texts = scan_strs(source);
    // `&|` and `<>` do not pair, so every character stands alone
    assert_eq!(
        texts,
        vec!["=", "!", "<", ">", "+", "-", "*", "%", "&", "|", ":", "?", "."]
    );
    assert!(scan_tags(source).iter().all(|&t| t == Tag::Operator));
}

#[test]
fn unlisted_pairs_do_not_merge() {
    for (source, expected) in [
        ("<>", vec!["<", ">"]),
        ("=>", vec!["=", ">"]),
        ("->", vec!["-", ">"]),
        ("!!", vec!["!", "!"]),
        ("::", vec![":", ":"]),
        ("++", vec!["+", "+"]),
    ] {
        assert_eq!(scan_strs(source), expected, "{source}");
    }
}

#[test]
fn longest_listed_match_wins() {
    assert_eq!(scan_strs("==="), vec!["==", "="]);
    assert_eq!(scan_strs("...."), vec!["...", "."]);
    assert_eq!(scan_strs("<=="), vec!["<=", "="]);
    assert_eq!(scan_strs("|||"), vec!["||", "|"]);
}

#[test]
fn spread_and_attribute_access() {
    assert_eq!(
        scan_texts("[for x in xs: x...]"),
        vec![
            (Tag::LBrack, "["),
            (Tag::Keyword, "for"),
            (Tag::Whitespace, " "),
            (Tag::Identifier, "x"),
            (Tag::Whitespace, " "),
            (Tag::Keyword, "in"),
            (Tag::Whitespace, " "),
            (Tag::Identifier, "xs"),
            (Tag::Operator, ":"),
            (Tag::Whitespace, " "),
            (Tag::Identifier, "x"),
            (Tag::Operator, "..."),
            (Tag::RBrack, "]"),
        ]
    );
}

// ─── Identifiers & Keywords ────────────────────────────────────

#[test]
fn simple_identifiers() {
    for source in ["foo", "foo_bar", "_", "_x", "a1", "foo-bar-baz", "a1-2", "foo--"] {
        assert_eq!(scan_texts(source), vec![(Tag::Identifier, source)], "{source}");
    }
}

#[test]
fn leading_hyphen_is_operator() {
    assert_eq!(
        scan_texts("-foo"),
        vec![(Tag::Operator, "-"), (Tag::Identifier, "foo")]
    );
}

#[test]
fn every_keyword_alone_is_keyword() {
    for &word in crate::keywords::TERRAMATE_KEYWORDS {
        assert_eq!(scan_texts(word), vec![(Tag::Keyword, word)], "{word}");
    }
}

#[test]
fn keyword_with_continuation_is_identifier() {
    for &word in crate::keywords::TERRAMATE_KEYWORDS {
        for suffix in ["x", "Z", "1", "_", "-"] {
            let source = format!("{word}{suffix}");
            assert_eq!(
                scan_texts(&source),
                vec![(Tag::Identifier, source.as_str())],
                "{source}"
            );
        }
    }
}

#[test]
fn keywords_are_case_sensitive() {
    assert_eq!(scan_tags("Stack"), vec![Tag::Identifier]);
    assert_eq!(scan_tags("TRUE"), vec![Tag::Identifier]);
}

#[test]
fn dotted_access_splits_on_dot() {
    assert_eq!(
        scan_texts("global.name"),
        vec![
            (Tag::Identifier, "global"),
            (Tag::Operator, "."),
            (Tag::Identifier, "name"),
        ]
    );
}

#[test]
fn custom_keyword_set() {
    let kw = KeywordSet::new(["resource"]);
    let source = "resource stack";
    let tags: Vec<_> = Scanner::new(source, &kw).map(|t| t.tag).collect();
    assert_eq!(tags, vec![Tag::Keyword, Tag::Whitespace, Tag::Identifier]);
}

#[test]
fn unicode_identifiers() {
    assert_eq!(scan_texts("\u{e9}t\u{e9}"), vec![(Tag::Identifier, "\u{e9}t\u{e9}")]);
    assert_eq!(scan_texts("\u{540d}\u{524d}"), vec![(Tag::Identifier, "\u{540d}\u{524d}")]);
    assert_eq!(scan_texts("x\u{e9}-1"), vec![(Tag::Identifier, "x\u{e9}-1")]);
    assert_eq!(scan_texts("x\u{663}"), vec![(Tag::Identifier, "x\u{663}")]);
}

#[test]
fn only_letters_and_decimal_digits_continue_identifiers() {
    assert_eq!(
        scan_texts("x\u{b2}"),
        vec![(Tag::Identifier, "x"), (Tag::BadCharacter, "\u{b2}")]
    );
    // Combining acute accent
    assert_eq!(
        scan_texts("e\u{301}"),
        vec![(Tag::Identifier, "e"), (Tag::BadCharacter, "\u{301}")]
    );
}

#[test]
fn letter_number_does_not_start_identifier() {
    // Roman numeral twelve is alphabetic but not a letter
    assert_eq!(scan("\u{216b}"), vec![tok(Tag::BadCharacter, 0, 3)]);
}

// ─── Bad Characters ────────────────────────────────────────────

#[test]
fn unmatched_ascii_is_bad_character() {
    for source in ["@", "$", "~", "^", ";", ",", "\\", "`", "'", "\u{1}", "\u{7f}"] {
        assert_eq!(scan_texts(source), vec![(Tag::BadCharacter, source)], "{source:?}");
    }
}

#[test]
fn comma_between_items_is_bad_character() {
    assert_eq!(
        scan_tags("a, b"),
        vec![Tag::Identifier, Tag::BadCharacter, Tag::Whitespace, Tag::Identifier]
    );
}

#[test]
fn interior_null_is_bad_character() {
    assert_eq!(
        scan("a\0b"),
        vec![
            tok(Tag::Identifier, 0, 1),
            tok(Tag::BadCharacter, 1, 2),
            tok(Tag::Identifier, 2, 3),
        ]
    );
}

#[test]
fn non_ascii_symbol_is_one_bad_character() {
    assert_eq!(scan("\u{20ac}"), vec![tok(Tag::BadCharacter, 0, 3)]);
    assert_eq!(scan("\u{1F600}"), vec![tok(Tag::BadCharacter, 0, 4)]);
}

#[test]
fn bad_characters_do_not_merge() {
    assert_eq!(scan_tags("@@"), vec![Tag::BadCharacter, Tag::BadCharacter]);
}

// ─── Windows ───────────────────────────────────────────────────

#[test]
fn sub_window_in_middle_of_buffer() {
    let source = "stack { x }";
    let tokens: Vec<_> = Scanner::with_range(source, 6..9, KeywordSet::terramate())
        .expect("valid window")
        .collect();
    assert_eq!(
        tokens,
        vec![
            tok(Tag::LBrace, 6, 7),
            tok(Tag::Whitespace, 7, 8),
            tok(Tag::Identifier, 8, 9),
        ]
    );
}

#[test]
fn window_end_truncates_keyword() {
    let tokens: Vec<_> = Scanner::with_range("globals", 0..4, KeywordSet::terramate())
        .expect("valid window")
        .collect();
    assert_eq!(tokens, vec![tok(Tag::Identifier, 0, 4)]);
}

#[test]
fn window_end_truncates_string() {
    let tokens: Vec<_> = Scanner::with_range(r#""abc" x"#, 0..3, KeywordSet::terramate())
        .expect("valid window")
        .collect();
    assert_eq!(tokens, vec![tok(Tag::String, 0, 3)]);
}

#[test]
fn window_end_splits_operator_pair() {
    let tokens: Vec<_> = Scanner::with_range("a==b", 0..2, KeywordSet::terramate())
        .expect("valid window")
        .collect();
    assert_eq!(tokens, vec![tok(Tag::Identifier, 0, 1), tok(Tag::Operator, 1, 2)]);
}

#[test]
fn window_end_hides_block_terminator() {
    let tokens: Vec<_> = Scanner::with_range("/* */", 0..4, KeywordSet::terramate())
        .expect("valid window")
        .collect();
    assert_eq!(tokens, vec![tok(Tag::BlockComment, 0, 4)]);
}

#[test]
fn empty_window_is_eof_at_offset() {
    let scanner =
        Scanner::with_range("abc", 2..2, KeywordSet::terramate()).expect("valid window");
    assert_eq!(scanner.token(), tok(Tag::Eof, 2, 2));
}

// ─── Reset & Accessors ─────────────────────────────────────────

#[test]
fn reset_scans_first_token_immediately() {
    let mut scanner = Scanner::new("", KeywordSet::terramate());
    scanner
        .reset("stack {", 0, 7)
        .expect("valid window");
    assert_eq!(scanner.tag(), Tag::Keyword);
    assert_eq!(scanner.start(), 0);
    assert_eq!(scanner.end(), 5);
    assert_eq!(scanner.state(), 0);
    assert_eq!(scanner.window_end(), 7);
}

#[test]
fn reset_restarts_from_new_offset() {
    let source = "a = 1";
    let mut scanner = Scanner::new(source, KeywordSet::terramate());
    let first: Vec<_> = scanner.by_ref().collect();
    for _ in 0..3 {
        scanner.reset(source, 0, 5).expect("valid window");
        let again: Vec<_> = scanner.by_ref().collect();
        assert_eq!(again, first);
    }
    scanner.reset(source, 4, 5).expect("valid window");
    assert_eq!(scanner.token(), tok(Tag::Number, 4, 5));
}

#[test]
fn reset_rejects_inverted_window() {
    let mut scanner = Scanner::new("abc", KeywordSet::terramate());
    assert_eq!(
        scanner.reset("abc", 2, 1),
        Err(RangeError::Inverted { start: 2, end: 1 })
    );
}

#[test]
fn reset_rejects_out_of_bounds_window() {
    let mut scanner = Scanner::new("abc", KeywordSet::terramate());
    assert_eq!(
        scanner.reset("abc", 0, 4),
        Err(RangeError::OutOfBounds { end: 4, len: 3 })
    );
}

#[test]
fn reset_rejects_split_character() {
    let mut scanner = Scanner::new("", KeywordSet::terramate());
    assert_eq!(
        scanner.reset("\u{e9}x", 1, 3),
        Err(RangeError::NotCharBoundary { offset: 1 })
    );
}

#[test]
fn with_range_rejects_same_windows_as_reset() {
    let kw = KeywordSet::terramate();
    for (source, start, end) in [("abc", 2, 1), ("abc", 0, 4), ("\u{e9}x", 1, 3)] {
        let mut scanner = Scanner::new("", kw);
        let expected = scanner.reset(source, start, end).unwrap_err();
        assert_eq!(
            Scanner::with_range(source, start..end, kw).err(),
            Some(expected),
            "{source:?} {start}..{end}"
        );
    }
}

#[test]
fn failed_reset_keeps_previous_session() {
    let mut scanner = Scanner::new("stack", KeywordSet::terramate());
    let before = scanner.token();
    assert!(scanner.reset("x", 5, 0).is_err());
    assert_eq!(scanner.token(), before);
}

#[test]
fn range_error_messages() {
    assert_eq!(
        RangeError::Inverted { start: 2, end: 1 }.to_string(),
        "scan window start 2 is past its end 1"
    );
    assert_eq!(
        RangeError::OutOfBounds { end: 9, len: 3 }.to_string(),
        "scan window end 9 exceeds buffer length 3"
    );
}

// ─── EOF ───────────────────────────────────────────────────────

#[test]
fn eof_on_empty_source() {
    let scanner = Scanner::new("", KeywordSet::terramate());
    assert_eq!(scanner.token(), tok(Tag::Eof, 0, 0));
}

#[test]
fn repeated_advance_at_eof_is_noop() {
    let mut scanner = Scanner::new("x", KeywordSet::terramate());
    scanner.advance();
    for _ in 0..5 {
        assert_eq!(scanner.token(), tok(Tag::Eof, 1, 1));
        scanner.advance();
    }
}

#[test]
fn iterator_is_fused() {
    let mut scanner = Scanner::new("x", KeywordSet::terramate());
    assert_eq!(scanner.next(), Some(tok(Tag::Identifier, 0, 1)));
    assert_eq!(scanner.next(), None);
    assert_eq!(scanner.next(), None);
}

// ─── Pure Step ─────────────────────────────────────────────────

#[test]
fn scan_at_returns_token_at_offset() {
    let kw = KeywordSet::terramate();
    assert_eq!(scan_at("a == b", 6, 2, kw), Ok(tok(Tag::Operator, 2, 4)));
    assert_eq!(scan_at("a == b", 6, 4, kw), Ok(tok(Tag::Whitespace, 4, 5)));
}

#[test]
fn scan_at_end_is_eof() {
    assert_eq!(
        scan_at("abc", 3, 3, KeywordSet::terramate()),
        Ok(tok(Tag::Eof, 3, 3))
    );
}

#[test]
fn scan_at_chain_matches_scanner() {
    let source = "globals {\n  a = [1, 2]\n}\n";
    let kw = KeywordSet::terramate();
    let end = u32::try_from(source.len()).expect("test source fits in u32");
    let mut pos = 0;
    let mut chained = Vec::new();
    loop {
        let token = scan_at(source, end, pos, kw).expect("valid window");
        if token.tag == Tag::Eof {
            break;
        }
        chained.push(token);
        pos = token.end;
    }
    assert_eq!(chained, scan(source));
}

#[test]
fn scan_at_rejects_bad_offsets() {
    assert!(scan_at("abc", 2, 3, KeywordSet::terramate()).is_err());
}

#[test]
fn tokenize_convenience() {
    assert_eq!(tokenize("stack {}"), scan("stack {}"));
    assert_eq!(tokenize("").len(), 0);
}

// ─── Realistic Terramate ───────────────────────────────────────

#[test]
fn realistic_stack_block() {
    let source = "stack {\n  name = \"app\"\n  tags = [\"a\", \"b\"]\n}\n";
    assert_eq!(
        scan_tags(source),
        vec![
            Tag::Keyword,
            Tag::Whitespace,
            Tag::LBrace,
            Tag::Whitespace,
            Tag::Identifier,
            Tag::Whitespace,
            Tag::Operator,
            Tag::Whitespace,
            Tag::String,
            Tag::Whitespace,
            Tag::Identifier,
            Tag::Whitespace,
            Tag::Operator,
            Tag::Whitespace,
            Tag::LBrack,
            Tag::String,
            Tag::BadCharacter,
            Tag::Whitespace,
            Tag::String,
            Tag::RBrack,
            Tag::Whitespace,
            Tag::RBrace,
            Tag::Whitespace,
        ]
    );
}

#[test]
fn realistic_generate_hcl() {
    let source = r#"generate_hcl "backend.tf" {
  condition = tm_length(global.regions) >= 2 && true
  content {
    terraform {}
  }
}"#;
    let texts: Vec<_> = scan_texts(source)
        .into_iter()
        .filter(|(tag, _)| *tag != Tag::Whitespace)
        .collect();
    assert_eq!(
        texts,
        vec![
            (Tag::Keyword, "generate_hcl"),
            (Tag::String, r#""backend.tf""#),
            (Tag::LBrace, "{"),
            (Tag::Identifier, "condition"),
            (Tag::Operator, "="),
            (Tag::Identifier, "tm_length"),
            (Tag::LParen, "("),
            (Tag::Identifier, "global"),
            (Tag::Operator, "."),
            (Tag::Identifier, "regions"),
            (Tag::RParen, ")"),
            (Tag::Operator, ">="),
            (Tag::Number, "2"),
            (Tag::Operator, "&&"),
            (Tag::Keyword, "true"),
            (Tag::Keyword, "content"),
            (Tag::LBrace, "{"),
            (Tag::Identifier, "terraform"),
            (Tag::LBrace, "{"),
            (Tag::RBrace, "}"),
            (Tag::RBrace, "}"),
            (Tag::RBrace, "}"),
        ]
    );
}

// ─── Property Tests ────────────────────────────────────────────

#[test]
fn spans_cover_source_exactly() {
    let sources = [
        "",
        "x",
        "stack { name = \"a\" }",
        "# c\n// d\n/* e */",
        "1.2.3 1e 1e+ ... .. . <> == !=",
        "\"unterminated \\",
        "@$,;\0\u{20ac}\u{1F600}",
        "  \t\n  \r\n  ",
    ];
    for source in sources {
        let tokens = scan(source);
        let mut pos = 0;
        for t in &tokens {
            assert_eq!(t.start, pos, "gap or overlap before {t} in {source:?}");
            assert!(t.end > t.start, "empty token {t} in {source:?}");
            pos = t.end;
        }
        assert_eq!(pos as usize, source.len(), "coverage mismatch for {source:?}");
    }
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_scanner {
    use super::super::*;
    use proptest::prelude::*;

    /// Characters that exercise every scanner branch.
    const CONFIG_ALPHABET: &str =
        r#"[a-zA-Z0-9_\-{}\[\]()=!<>&|.:?+*%/#"\\ \n\t,@eE\u{e9}\u{20ac}\u{2003}]{0,64}"#;

    fn window_end(source: &str) -> u32 {
        u32::try_from(source.len()).unwrap_or(u32::MAX)
    }

    /// Round `index` down to the nearest character boundary of `source`.
    fn floor_boundary(source: &str, mut index: usize) -> usize {
        while !source.is_char_boundary(index) {
            index -= 1;
        }
        index
    }

    fn check_coverage(source: &str, start: u32, end: u32) -> Result<(), TestCaseError> {
        let scanner = Scanner::with_range(source, start..end, KeywordSet::terramate())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let mut pos = start;
        let mut steps = 0u32;
        for token in scanner {
            prop_assert_eq!(token.start, pos);
            prop_assert!(token.end > token.start);
            prop_assert!(token.end <= end);
            prop_assert_ne!(token.tag, Tag::Eof);
            pos = token.end;
            steps += 1;
        }
        prop_assert_eq!(pos, end);
        prop_assert!(steps <= end - start);
        Ok(())
    }

    proptest! {
        #[test]
        fn coverage_any_unicode(source in any::<String>()) {
            check_coverage(&source, 0, window_end(&source))?;
        }

        #[test]
        fn coverage_config_alphabet(source in CONFIG_ALPHABET) {
            check_coverage(&source, 0, window_end(&source))?;
        }

        #[test]
        fn coverage_sub_window(
            source in CONFIG_ALPHABET,
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let len = source.len() + 1;
            let x = floor_boundary(&source, a.index(len));
            let y = floor_boundary(&source, b.index(len));
            let (start, end) = (x.min(y), x.max(y));
            check_coverage(
                &source,
                u32::try_from(start).unwrap_or(0),
                u32::try_from(end).unwrap_or(0),
            )?;
        }

        #[test]
        fn resume_at_token_boundary(source in CONFIG_ALPHABET, pick in any::<prop::sample::Index>()) {
            let kw = KeywordSet::terramate();
            let end = window_end(&source);
            let full: Vec<Token> = Scanner::new(&source, kw).collect();
            let boundaries: Vec<u32> = std::iter::once(0)
                .chain(full.iter().map(|t| t.end))
                .collect();
            let mid = boundaries[pick.index(boundaries.len())];

            let mut split: Vec<Token> = Scanner::with_range(&source, 0..mid, kw)
                .map_err(|e| TestCaseError::fail(e.to_string()))?
                .collect();
            split.extend(
                Scanner::with_range(&source, mid..end, kw)
                    .map_err(|e| TestCaseError::fail(e.to_string()))?,
            );
            prop_assert_eq!(split, full);
        }

        #[test]
        fn scan_at_reproduces_every_token(source in CONFIG_ALPHABET) {
            let kw = KeywordSet::terramate();
            let end = window_end(&source);
            for token in Scanner::new(&source, kw) {
                prop_assert_eq!(scan_at(&source, end, token.start, kw), Ok(token));
            }
        }
    }
}
