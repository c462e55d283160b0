use super::segment::{Modifier, Operator, Segment};
use super::UriTemplate;
use crate::error::UriTemplateError;

fn variable(segment: &Segment) -> &super::segment::VariableSegment {
    match segment {
        Segment::Variable(var) => var,
        Segment::Raw(_) => panic!("expected a variable segment"),
    }
}

#[test]
fn test_literal_only() {
    let template = UriTemplate::parse("/books/list").unwrap();
    assert_eq!(template.segments().len(), 1);
    assert!(!template.segments()[0].is_variable());
    assert_eq!(template.to_string(), "/books/list");
}

#[test]
fn test_simple_variable() {
    let template = UriTemplate::parse("/books/{id}").unwrap();
    let segments = template.segments();
    assert_eq!(segments.len(), 2);
    let var = variable(&segments[1]);
    assert_eq!(var.name(), "id");
    assert_eq!(var.operator(), Operator::None);
    assert_eq!(*var.modifier(), Modifier::None);
    assert!(!var.is_query_segment());
}

#[test]
fn test_trailing_slash_stripped() {
    assert_eq!(UriTemplate::parse("/books/").unwrap().as_str(), "/books");
    assert_eq!(UriTemplate::parse("/").unwrap().as_str(), "/");
}

#[test]
fn test_operator_policies() {
    // (template, operator, encode)
    let cases = [
        ("{+var}", Operator::Plus, false),
        ("{#var}", Operator::Hash, false),
        ("{.var}", Operator::Dot, true),
        ("{/var}", Operator::Slash, true),
        ("{;var}", Operator::Semicolon, true),
        ("{?var}", Operator::Question, true),
        ("{&var}", Operator::Ampersand, true),
        ("{var}", Operator::None, true),
    ];
    for (text, operator, encode) in cases {
        let template = UriTemplate::parse(text).unwrap();
        let var = variable(&template.segments()[0]);
        assert_eq!(var.operator(), operator, "operator for {text}");
        assert_eq!(var.encode, encode, "encode flag for {text}");
    }
}

#[test]
fn test_query_operators_flag_query_segment() {
    for text in ["{;var}", "{?var}", "{&var}", "{#var}"] {
        let template = UriTemplate::parse(text).unwrap();
        assert!(
            template.segments()[0].is_query_segment(),
            "query flag for {text}"
        );
    }
    for text in ["{+var}", "{.var}", "{/var}", "{var}"] {
        let template = UriTemplate::parse(text).unwrap();
        assert!(
            !template.segments()[0].is_query_segment(),
            "query flag for {text}"
        );
    }
}

#[test]
fn test_question_mark_in_text_flags_rest_of_component() {
    let template = UriTemplate::parse("/books{id}?format={format}").unwrap();
    let segments = template.segments();
    assert!(!segments[0].is_query_segment());
    assert!(!segments[1].is_query_segment());
    assert!(segments[2].is_query_segment()); // "?format="
    assert!(segments[3].is_query_segment());
}

#[test]
fn test_grouped_variables_share_operator() {
    let template = UriTemplate::parse("{?page,size}").unwrap();
    let segments = template.segments();
    assert_eq!(segments.len(), 2);
    let page = variable(&segments[0]);
    let size = variable(&segments[1]);
    assert_eq!(page.operator(), Operator::Question);
    assert_eq!(size.operator(), Operator::Question);
    assert_eq!(page.prefix.as_deref(), Some("?page="));
    assert_eq!(size.prefix.as_deref(), Some("size="));
    assert_eq!(page.previous_delimiter, None);
    assert_eq!(size.previous_delimiter.as_deref(), Some("&"));
}

#[test]
fn test_group_delimiters_by_operator() {
    let cases = [
        ("{a,b}", Some(",")),
        ("{.a,b}", Some(".")),
        ("{/a,b}", Some("/")),
        ("{?a,b}", Some("&")),
        ("{&a,b}", Some("&")),
        ("{;a,b}", None),
    ];
    for (text, expected) in cases {
        let template = UriTemplate::parse(text).unwrap();
        let second = variable(&template.segments()[1]);
        assert_eq!(
            second.previous_delimiter.as_deref(),
            expected,
            "previous delimiter for {text}"
        );
    }
}

#[test]
fn test_explode_modifier() {
    let template = UriTemplate::parse("{/list*}").unwrap();
    let var = variable(&template.segments()[0]);
    assert_eq!(*var.modifier(), Modifier::Explode);
    assert_eq!(var.delimiter, "/");
}

#[test]
fn test_explode_must_close_group() {
    assert_eq!(
        UriTemplate::parse("{list*x}"),
        Err(UriTemplateError::InvalidModifier)
    );
}

#[test]
fn test_prefix_modifier_keeps_raw_text() {
    let template = UriTemplate::parse("{var:30}").unwrap();
    let var = variable(&template.segments()[0]);
    assert_eq!(*var.modifier(), Modifier::Prefix("30".to_string()));
    assert_eq!(template.to_string(), "{var:30}");
}

#[test]
fn test_empty_variable_emits_nothing() {
    // Observed reference behavior: a group that closes with an empty name
    // vanishes entirely.
    let template = UriTemplate::parse("/a{+}/b").unwrap();
    assert_eq!(template.segments().len(), 2);
    assert_eq!(template.to_string(), "/a/b");

    let template = UriTemplate::parse("{a,}").unwrap();
    assert_eq!(template.segments().len(), 1);
}

#[test]
fn test_bare_braces_swallow_closing_brace() {
    // `}` is not special at variable start, so `{}` never closes: the
    // brace lands in the name buffer and the unterminated tail is dropped.
    let template = UriTemplate::parse("/a{}/b").unwrap();
    assert_eq!(template.segments().len(), 1);
    assert_eq!(template.to_string(), "/a");
}

#[test]
fn test_unterminated_variable_stops_silently() {
    // Inconsistent with the `*` error, but it is what the grammar does.
    let template = UriTemplate::parse("/a{var").unwrap();
    assert_eq!(template.segments().len(), 1);
    assert_eq!(template.to_string(), "/a");
}

#[test]
fn test_full_uri_decomposition() {
    let template =
        UriTemplate::parse("http://localhost:8080/api/books/{id}?format={format}").unwrap();
    assert_eq!(
        template.to_string(),
        "http://localhost:8080/api/books/{id}?format={format}"
    );
    let names: Vec<&str> = template
        .segments()
        .iter()
        .filter_map(Segment::variable_name)
        .collect();
    assert_eq!(names, vec!["id", "format"]);
}

#[test]
fn test_templated_port() {
    let template = UriTemplate::parse("http://localhost:{port}/up").unwrap();
    let names: Vec<&str> = template
        .segments()
        .iter()
        .filter_map(Segment::variable_name)
        .collect();
    assert_eq!(names, vec!["port"]);
    assert_eq!(template.to_string(), "http://localhost:{port}/up");
}

#[test]
fn test_filtered_rendering() {
    let template = UriTemplate::parse("/books{?page,size}").unwrap();
    assert_eq!(
        template.to_string_filtered(|segment| !segment.is_query_segment()),
        "/books"
    );
    assert_eq!(
        template.to_string_filtered(Segment::is_query_segment),
        "{?page,size}"
    );
}

#[test]
fn test_adjacent_groups_merge_in_rendering() {
    // Consecutive variables with the same operator re-render as one group.
    let template = UriTemplate::parse("{a}{b}").unwrap();
    assert_eq!(template.to_string(), "{a,b}");
}
