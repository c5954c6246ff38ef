// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

const DATE: Rule = Rule::Date {
    required: false,
    clearable: true,
    invalid: "bad date",
};

const STATUS: Rule = Rule::Choice {
    options: &["planned", "active", "finished"],
    default: Some("planned"),
    invalid: "bad status",
};

fn set(v: &str) -> Patch<String> {
    Patch::Set(v.to_string())
}

#[parameterized(
    da = { "да", Some(true) },
    upper_yes = { "YES", Some(true) },
    one = { "1", Some(true) },
    net = { "Нет", Some(false) },
    n = { "n", Some(false) },
    zero = { "0", Some(false) },
    maybe = { "может", None },
    blank = { "", None },
)]
fn yes_no_words(input: &str, expected: Option<bool>) {
    assert_eq!(parse_yes_no(input), expected);
}

#[parameterized(
    required_blank = { Rule::Required { blank: "empty" }, "", Err("empty") },
    required_dash_is_text = { Rule::Required { blank: "empty" }, "-", Ok(set("-")) },
    optional_dash = { Rule::Optional, "-", Ok(Patch::Unchanged) },
    optional_text = { Rule::Optional, "league", Ok(set("league")) },
    clearable_keep = { Rule::Clearable, "-", Ok(Patch::Unchanged) },
    clearable_delete = { Rule::Clearable, "УДАЛИТЬ", Ok(Patch::Cleared) },
    clearable_text = { Rule::Clearable, "new note", Ok(set("new note")) },
    date_keep = { DATE, "-", Ok(Patch::Unchanged) },
    date_clear = { DATE, "удалить", Ok(Patch::Cleared) },
    date_value = { DATE, "2024-05-01", Ok(set("2024-05-01")) },
    date_garbage = { DATE, "01.05.2024", Err("bad date") },
    choice_default = { STATUS, "", Ok(set("planned")) },
    choice_lowercased = { STATUS, "Active", Ok(set("active")) },
    choice_unknown = { STATUS, "done", Err("bad status") },
)]
fn rules_interpret_replies(rule: Rule, input: &str, expected: Result<Patch<String>, &'static str>) {
    assert_eq!(rule.apply(input), expected);
}

#[test]
fn required_date_rejects_skip() {
    let rule = Rule::Date {
        required: true,
        clearable: false,
        invalid: "need date",
    };
    assert_eq!(rule.apply("-"), Err("need date"));
    assert_eq!(rule.apply("удалить"), Err("need date"));
}

#[test]
fn time_is_normalized() {
    let rule = Rule::Time {
        required: true,
        invalid: "bad time",
    };
    assert_eq!(rule.apply("18:30"), Ok(set("18:30")));
    assert_eq!(rule.apply("25:00"), Err("bad time"));
}

#[test]
fn yes_no_without_default_keeps_on_dash() {
    let rule = Rule::YesNo {
        default: None,
        invalid: "yes or no",
    };
    assert_eq!(rule.apply("-"), Ok(Patch::Unchanged));
    assert_eq!(rule.apply("нет"), Ok(set("false")));
    assert_eq!(rule.apply("what"), Err("yes or no"));
}

#[test]
fn number_dash_clears_and_blank_can_be_rejected() {
    let strict = Rule::Number {
        blank: Some("need number"),
        invalid: "integer please",
    };
    assert_eq!(strict.apply(""), Err("need number"));
    assert_eq!(strict.apply("-"), Ok(Patch::Cleared));
    assert_eq!(strict.apply("10"), Ok(set("10")));
    assert_eq!(strict.apply("ten"), Err("integer please"));

    let lenient = Rule::Number {
        blank: None,
        invalid: "integer please",
    };
    assert_eq!(lenient.apply(""), Ok(Patch::Unchanged));
}

#[test]
fn current_prompt_shows_stashed_value_or_placeholder() {
    let prompt = Prompt::Current {
        label: "Текущее примечание",
        orig: "orig_note",
        empty: "(пусто)",
        ask: "Введите новое примечание.",
    };
    let mut data = WizardData::new();
    assert_eq!(
        prompt.render(&data),
        "Текущее примечание: (пусто)\nВведите новое примечание."
    );

    data.set("orig_note", "under_18");
    assert_eq!(
        prompt.render(&data),
        "Текущее примечание: under\\_18\nВведите новое примечание."
    );
}

#[test]
fn field_step_records_tri_state_answer() {
    let step = FieldStep::new("note", Prompt::Fixed("note?"), Rule::Clearable);
    let mut data = WizardData::new();

    step.accept("удалить", &mut data).unwrap();
    assert_eq!(data.patch("note"), Patch::Cleared);

    step.accept("-", &mut data).unwrap();
    assert_eq!(data.patch("note"), Patch::Unchanged);
}

#[test]
fn rejected_answer_leaves_data_alone() {
    let step = FieldStep::new("start", Prompt::Fixed("date?"), DATE);
    let mut data = WizardData::new();
    data.set("start", "2024-01-01");

    let err = step.accept("tomorrow", &mut data).unwrap_err();

    assert_eq!(err, "bad date");
    assert_eq!(data.get("start"), Some("2024-01-01"));
}
