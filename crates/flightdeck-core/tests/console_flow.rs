use flightdeck_core::checklist::{Checklist, ChecklistBoard, ChecklistItem};
use flightdeck_core::console::Console;
use flightdeck_core::filter::filter_flights;
use flightdeck_core::progress::{ChecklistStatus, percent};
use flightdeck_core::todo::{Category, Priority};

fn checklist(id: u64, flags: &[bool]) -> Checklist {
    let items = flags
        .iter()
        .enumerate()
        .map(|(idx, done)| ChecklistItem::new(idx as u64 + 1, format!("item {}", idx + 1), *done))
        .collect();
    Checklist::new(id, "Engine Start Procedure", "Airbus A320", items)
}

#[test]
fn every_toggle_leaves_checklists_consistent() {
    let mut board = ChecklistBoard::new(vec![
        checklist(1, &[true, true, true, false, false, false]),
        checklist(2, &[false, false, false, false, false]),
        checklist(3, &[true, true, true, true]),
    ]);

    let toggles = [(1, 4), (1, 5), (1, 6), (2, 3), (3, 1), (3, 1), (1, 1), (2, 9), (8, 1)];
    for (checklist_id, item_id) in toggles {
        board.toggle_item(checklist_id, item_id);
        for c in board.iter() {
            let done = c.items().iter().filter(|i| i.completed).count();
            assert_eq!(c.progress(), percent(done, c.items().len()));
            let expected = match c.progress() {
                100 => ChecklistStatus::Completed,
                0 => ChecklistStatus::NotStarted,
                _ => ChecklistStatus::InProgress,
            };
            assert_eq!(c.status(), expected);
        }
    }

    let c1 = board.get(1).expect("checklist 1");
    assert_eq!(c1.progress(), 83);
    assert_eq!(c1.status(), ChecklistStatus::InProgress);
}

#[test]
fn sample_console_scenarios() {
    let mut console = Console::sample();

    let pre_flight = console.checklists().get(1).expect("pre-flight");
    assert_eq!((pre_flight.progress(), pre_flight.status()), (50, ChecklistStatus::InProgress));
    let landing = console.checklists().get(3).expect("landing");
    assert_eq!((landing.progress(), landing.status()), (100, ChecklistStatus::Completed));

    assert_eq!(console.notifications().len(), 6);
    console.mark_as_read(3);
    assert_eq!(console.notifications().unread_count(), 3);
    console.mark_all_as_read();
    assert_eq!(console.notifications().unread_count(), 0);

    let hits = filter_flights(console.flights(), "JFK");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].origin, "JFK");
    assert_eq!(console.flights().len(), 3);
}

#[test]
fn todo_lifecycle_through_console() {
    let mut console = Console::sample();
    let before = console.todos().snapshot();

    assert_eq!(console.add_todo("   ", Category::Safety, Priority::High), None);
    assert_eq!(*console.todos().snapshot(), *before);

    let id = console
        .add_todo("Renew medical certificate", Category::Certification, Priority::High)
        .expect("todo added");
    assert!(console.todos().iter().all(|t| t.id <= id));
    assert_eq!(console.todos().iter().next().map(|t| t.id), Some(id));
    assert_eq!(console.todos().summary().total, 6);

    console.toggle_todo(id);
    let summary = console.todos().summary();
    assert_eq!((summary.completed, summary.total, summary.percent), (2, 6, 33));

    console.delete_todo(id);
    let after_delete = console.todos().snapshot();
    console.delete_todo(id);
    assert_eq!(*console.todos().snapshot(), *after_delete);
    assert_eq!(*after_delete, *before);

    // snapshot taken earlier never saw the new todo
    assert_eq!(before.len(), 5);
}
