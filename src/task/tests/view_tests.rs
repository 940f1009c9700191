//! View projection tests: lane grouping, filtering, and due-date sorting.

use crate::task::domain::{
    Category, DueBucket, DueDateDirection, NewTaskData, Status, Task, TaskFilter, TaskTitle, lanes,
    sort_by_due_date,
};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::rstest;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn task(title: &str, category: Category, due: Option<NaiveDate>, status: Status, order: i64) -> Task {
    Task::create(
        NewTaskData {
            title: TaskTitle::new(title).expect("valid title"),
            description: None,
            category,
            due_date: due,
            status,
            order,
        },
        &DefaultClock,
    )
}

#[test]
fn lanes_group_by_status_and_sort_by_order() {
    let today = date(2026, 8, 15);
    let tasks = vec![
        task("b", Category::Work, None, Status::Todo, 2),
        task("a", Category::Work, None, Status::Todo, 1),
        task("c", Category::Work, None, Status::InProgress, 1),
        task("d", Category::Work, None, Status::Completed, 1),
    ];

    let view = lanes(&tasks, &TaskFilter::new(), today);

    let todo_titles: Vec<&str> = view.todo.iter().map(|t| t.title().as_str()).collect();
    assert_eq!(todo_titles, vec!["a", "b"]);
    assert_eq!(view.in_progress.len(), 1);
    assert_eq!(view.completed.len(), 1);
    assert_eq!(view.len(), 4);
}

#[rstest]
#[case("report", true)]
#[case("REPORT", true)]
#[case("weekly", true)]
#[case("missing", false)]
fn search_matches_title_substring_case_insensitively(#[case] needle: &str, #[case] found: bool) {
    let today = date(2026, 8, 15);
    let tasks = vec![task(
        "Weekly Report",
        Category::Work,
        None,
        Status::Todo,
        1,
    )];

    let view = lanes(&tasks, &TaskFilter::new().with_search(needle), today);
    assert_eq!(!view.is_empty(), found);
}

#[test]
fn category_and_due_bucket_filters_combine() {
    let today = date(2026, 8, 15);
    let tasks = vec![
        task("match 1", Category::Personal, Some(today), Status::Todo, 1),
        task("match 2", Category::Personal, Some(today), Status::Completed, 1),
        task("wrong category", Category::Work, Some(today), Status::Todo, 2),
        task("wrong day", Category::Personal, Some(date(2026, 8, 16)), Status::Todo, 3),
        task("no due date", Category::Personal, None, Status::Todo, 4),
        task("wrong both", Category::Work, None, Status::InProgress, 1),
        task("match 3", Category::Personal, Some(today), Status::InProgress, 2),
        task("wrong month", Category::Personal, Some(date(2026, 9, 15)), Status::Todo, 5),
        task("wrong year", Category::Personal, Some(date(2025, 8, 15)), Status::Completed, 2),
        task("work today", Category::Work, Some(today), Status::Completed, 3),
    ];

    let filter = TaskFilter::new()
        .with_category(Category::Personal)
        .with_due_bucket(DueBucket::Today);
    let view = lanes(&tasks, &filter, today);

    assert_eq!(view.len(), 3);
    assert_eq!(view.todo.len(), 1);
    assert_eq!(view.in_progress.len(), 1);
    assert_eq!(view.completed.len(), 1);
}

#[rstest]
#[case(DueBucket::Today, date(2026, 8, 15), true)]
#[case(DueBucket::Today, date(2026, 8, 16), false)]
#[case(DueBucket::ThisMonth, date(2026, 8, 1), true)]
#[case(DueBucket::ThisMonth, date(2026, 7, 31), false)]
#[case(DueBucket::ThisYear, date(2026, 1, 1), true)]
#[case(DueBucket::ThisYear, date(2025, 12, 31), false)]
fn due_buckets_compare_against_the_given_today(
    #[case] bucket: DueBucket,
    #[case] due: NaiveDate,
    #[case] contained: bool,
) {
    let today = date(2026, 8, 15);
    assert_eq!(bucket.contains(due, today), contained);
}

#[test]
fn due_date_sort_descends_with_undated_tasks_last() {
    let tasks = vec![
        task("undated", Category::Work, None, Status::Todo, 1),
        task("early", Category::Work, Some(date(2026, 1, 1)), Status::Todo, 2),
        task("late", Category::Work, Some(date(2026, 12, 1)), Status::Todo, 3),
    ];

    let descending = sort_by_due_date(&tasks, DueDateDirection::Descending);
    let titles: Vec<&str> = descending.iter().map(|t| t.title().as_str()).collect();
    assert_eq!(titles, vec!["late", "early", "undated"]);

    let ascending = sort_by_due_date(&tasks, DueDateDirection::Ascending);
    let titles_asc: Vec<&str> = ascending.iter().map(|t| t.title().as_str()).collect();
    assert_eq!(titles_asc, vec!["early", "late", "undated"]);
}

#[test]
fn projections_leave_the_input_untouched() {
    let today = date(2026, 8, 15);
    let tasks = vec![
        task("b", Category::Work, Some(date(2026, 3, 1)), Status::Todo, 2),
        task("a", Category::Work, None, Status::Todo, 1),
    ];
    let snapshot = tasks.clone();

    let _view = lanes(&tasks, &TaskFilter::new(), today);
    let _sorted = sort_by_due_date(&tasks, DueDateDirection::Ascending);

    assert_eq!(tasks, snapshot);
}
