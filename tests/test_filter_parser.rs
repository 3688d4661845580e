use calorie_query::config::FilterRules;
use calorie_query::entity::{MEAL_ENTRY, USER, USER_ROLE};
use calorie_query::filter::{
    Comparator, FieldError, FilterError, FilterNode, FilterParser, SyntaxError, TypedValue,
    ValueError, compile, parse,
};

fn meal_entry_error(filter: &str) -> FilterError {
    parse(filter, &MEAL_ENTRY).expect_err("filter should be rejected")
}

#[test]
fn test_blank_filters_mean_no_filter() {
    for filter in ["", "     ", "\t"] {
        assert_eq!(parse(filter, &MEAL_ENTRY), Ok(None), "filter {filter:?}");
    }
}

#[test]
fn test_unclosed_brackets_are_reported() {
    let cases = [
        ("(id lt 20", ')'),
        ("id lt 20)", '('),
        ("((id lt 20) OR (id lt 20)", ')'),
        ("((id lt 20) AND (id lt 20)))", '('),
        ("((id lt 20))) AND (id lt 20", '('),
        ("((EntryUser.FirstName eq '20))') AND (id lt 20", ')'),
    ];

    for (filter, missing) in cases {
        let err = meal_entry_error(filter);
        assert_eq!(
            err,
            FilterError::Syntax(SyntaxError::UnbalancedBrackets { missing }),
            "filter {filter:?}"
        );
        assert_eq!(err.to_string(), format!("Invalid filter field {missing} missing"));
    }
}

#[test]
fn test_conditions_need_exactly_three_tokens() {
    for field in ["     ", "id ", " lt 20", "id lt 20 more", "id lt 20 more than 4"] {
        let err = meal_entry_error(&format!("(id lt 20) AND ({field})"));
        assert_eq!(
            err,
            FilterError::Syntax(SyntaxError::InvalidFieldSyntax(field.to_string()))
        );
        assert_eq!(err.to_string(), format!("Invalid filter field syntax ({field})"));
    }
}

#[test]
fn test_unbracketed_condition_needs_exactly_three_tokens() {
    for filter in ["id lt", "id", "id lt 20 more"] {
        assert_eq!(
            meal_entry_error(filter),
            FilterError::Syntax(SyntaxError::InvalidFieldSyntax(filter.to_string()))
        );
    }
    assert_eq!(
        parse("id lt", &USER),
        Err(FilterError::Syntax(SyntaxError::InvalidFieldSyntax("id lt".to_string())))
    );
}

#[test]
fn test_deep_nesting_is_rejected_before_recursing() {
    let parser = FilterParser::new(&FilterRules::default());
    let nested =
        |depth: usize| format!("{}Calories lt 20{}", "(".repeat(depth), ")".repeat(depth));

    let deep = nested(1000);
    assert!(deep.len() <= FilterRules::default().max_length);
    assert_eq!(
        parser.parse(&deep, &MEAL_ENTRY),
        Err(FilterError::Syntax(SyntaxError::TooDeep { limit: 64 }))
    );
    assert_eq!(
        parser.parse(&deep, &MEAL_ENTRY).unwrap_err().to_string(),
        "Filter nests brackets deeper than 64 levels"
    );

    let node = parser.parse(&nested(64), &MEAL_ENTRY).unwrap().unwrap();
    assert_eq!(node.condition_count(), 1);
}

#[test]
fn test_unknown_fields_are_rejected() {
    for name in ["Distanced", "EntryUser.Names", "EntryUser.Password", "CaloriesStatus"] {
        let err = meal_entry_error(&format!("(id lt 20) AND ({name} eq value)"));
        assert_eq!(err, FilterError::Field(FieldError::UnknownField(name.to_string())));
        assert_eq!(err.to_string(), format!("Invalid filter field {name}"));
    }

    assert_eq!(
        meal_entry_error("(Distanced eq 1)"),
        FilterError::Field(FieldError::UnknownField("Distanced".to_string()))
    );
}

#[test]
fn test_comparators_must_suit_the_field_kind() {
    let cases = [
        ("Calories", "like", "10"),
        ("EntryUser.FirstName", "gt", "Name"),
        ("EntryUser.FirstName", "lt", "Name"),
        ("EntryUser.Id", "like", "20"),
        ("EntryDateTime", "like", "2019-02-12"),
        ("EntryUser.Role", "like", "Admin"),
        ("EntryUser.Role", "gt", "Admin"),
        ("EntryUser.Role", "lt", "Admin"),
        ("WithInDailyLimit", "gt", "true"),
    ];

    for (field, comparator, value) in cases {
        let err = meal_entry_error(&format!("(Calories gt 20) OR ({field} {comparator} {value})"));
        assert_eq!(
            err,
            FilterError::Value(ValueError::IllegalComparator {
                comparator: comparator.to_string(),
                field: field.to_string(),
            })
        );
        assert_eq!(
            err.to_string(),
            format!("Invalid filter comparator {comparator} for {field}")
        );
    }
}

#[test]
fn test_values_must_parse_as_the_field_kind() {
    let cases = [
        ("Calories", "nice"),
        ("Calories", "12ef"),
        ("EntryUser.Id", "this"),
        ("EntryUser.Id", "14tu"),
        ("EntryDateTime", "this"),
        ("EntryDateTime", "12"),
        ("EntryUser.Role", "Admined"),
        ("WithInDailyLimit", "maybe"),
    ];

    for (field, value) in cases {
        let err = meal_entry_error(&format!("(Calories gt 20) OR ({field} eq {value})"));
        assert_eq!(
            err,
            FilterError::Value(ValueError::InvalidValue {
                literal: value.to_string(),
                field: field.to_string(),
            })
        );
        assert_eq!(err.to_string(), format!("Invalid value {value} for {field}"));
    }
}

#[test]
fn test_adjacent_conditions_need_an_operator() {
    let cases = [
        ("(id lt 20) (id lt 20)", "(id lt 20)", "(id lt 20)"),
        ("((id lt 20) (id lt 20)) OR (id eq 2)", "(id lt 20)", "(id lt 20)"),
        (
            "(EntryUser.FirstName eq '20) (id lt 20))')  (id eq 2)",
            "(EntryUser.FirstName eq '20) (id lt 20))')",
            "(id eq 2)",
        ),
    ];

    for (filter, left, right) in cases {
        let err = meal_entry_error(filter);
        assert_eq!(
            err,
            FilterError::Syntax(SyntaxError::MissingOperator {
                left: left.to_string(),
                right: right.to_string(),
            })
        );
        assert_eq!(
            err.to_string(),
            format!("Invalid filter comparator 'OR' or 'AND' missing (^) in '{left} ^ {right}'")
        );
    }
}

#[test]
fn test_misplaced_tokens_are_rejected() {
    let cases = [
        ("(EntryUser.FirstName eq '') OR ()", "()"),
        ("(id lt 20) OR AND (id lt 20)", "AND"),
        ("((id lt 20) AND NICE (id lt 20)) OR (id eq 2)", "NICE"),
        ("(id lt 20) NEW (id lt 20)", "NEW"),
        ("(id mx 20) AND (id lt 20)", "mx"),
        ("(id eq 20) AND (id lt 20) OR", "OR"),
        ("AND (id lt 20)", "AND"),
        ("id lt (20)", "id"),
    ];

    for (filter, token) in cases {
        let err = meal_entry_error(filter);
        assert_eq!(
            err,
            FilterError::Syntax(SyntaxError::UnexpectedToken(token.to_string())),
            "filter {filter:?}"
        );
        assert_eq!(err.to_string(), format!("Invalid filter syntax at '{token}'"));
    }
}

#[test]
fn test_nested_filter_builds_expected_tree() {
    let filter = "((((EntryUser.FirstName like 'Valid ( () Name') OR (Calories gt 20)) aND (CALORIES lt 0)) or ((EntryDateTime lt '2019-02-20') And(EntryDateTime gt '2020-01-30'))) And(Id gt 20000)";
    let expected = "((((EntryUser.FirstName:Like:Valid ( () Name::String):Or:(MealEntry.Calories:GreaterThan:20::Float64)):And:(MealEntry.Calories:LessThan:0::Float64)):Or:((MealEntry.EntryDateTime:LessThan:2019-02-20 00:00:00::DateTime):And:(MealEntry.EntryDateTime:GreaterThan:2020-01-30 00:00:00::DateTime))):And:(MealEntry.Id:GreaterThan:20000::Int64)";

    let node = parse(filter, &MEAL_ENTRY)
        .expect("valid filter")
        .expect("non-empty filter");

    assert_eq!(node.to_string(), expected);
    assert_eq!(node.condition_count(), 6);
    assert!(!node.has_brackets());
}

#[test]
fn test_quoted_parentheses_are_kept_verbatim() {
    let node = parse("(Name like 'Valid ( () Name')", &calorie_query::entity::MEAL_ITEM)
        .unwrap()
        .unwrap();

    let FilterNode::Field(cond) = node else {
        panic!("expected a field condition");
    };
    assert_eq!(cond.field, "Name");
    assert_eq!(cond.comparator, Comparator::Like);
    assert_eq!(cond.value, TypedValue::String("Valid ( () Name".to_string()));
    assert!(cond.has_brackets);
}

#[test]
fn test_enum_and_boolean_fields() {
    let node = parse("(Role eq admin) and (Role ne 0)", &USER)
        .unwrap()
        .unwrap();
    assert_eq!(
        node.to_string(),
        "(Role:Equals:Admin::UserRole):And:(Role:NotEquals:Regular::UserRole)"
    );

    let compiled = compile(Some(&node));
    assert_eq!(
        compiled.parameters[0].value,
        TypedValue::Enum {
            shape: &USER_ROLE,
            ordinal: 2
        }
    );

    let node = parse("WithInDailyLimit eq FALSE", &MEAL_ENTRY)
        .unwrap()
        .unwrap();
    assert_eq!(
        node.to_string(),
        "(MealEntry.WithInDailyLimit:Equals:false::Boolean)"
    );
}

#[test]
fn test_no_precedence_between_and_or() {
    let node = parse("(Id eq 1) or (Id eq 2) and (Id eq 3)", &USER)
        .unwrap()
        .unwrap();
    assert_eq!(
        compile(Some(&node)).text,
        "where (Id = @Id) Or (Id = @Id1) And (Id = @Id2)"
    );

    let node = parse("(Id eq 1) or ((Id eq 2) and (Id eq 3))", &USER)
        .unwrap()
        .unwrap();
    assert_eq!(
        compile(Some(&node)).text,
        "where (Id = @Id) Or ((Id = @Id1) And (Id = @Id2))"
    );
}

#[test]
fn test_parse_and_compile_are_deterministic() {
    let filter = "((Calories gt 100) or (Text like '%egg%')) and (EntryUser.Role eq Regular)";

    let first = compile(parse(filter, &MEAL_ENTRY).unwrap().as_ref());
    for _ in 0..5 {
        let again = compile(parse(filter, &MEAL_ENTRY).unwrap().as_ref());
        assert_eq!(again, first);
    }
}
