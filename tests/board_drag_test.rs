// Headless egui frames over the real board and tray
// The pointer position decides which drop target a release lands on

mod fixtures;

use egui::{pos2, vec2, Event, Pos2, RawInput, Rect};
use pretty_assertions::assert_eq;
use schedule_builder::models::day::{Day, Schedule};
use schedule_builder::services::board::{BoardState, LoadState};
use schedule_builder::services::dnd::{DragDropBackend, DragPayload, DragSession, DropOutcome};
use schedule_builder::ui_egui::drag::DragManager;
use schedule_builder::ui_egui::side_panel::{render_side_panel, SidePanelState};
use schedule_builder::ui_egui::views::day_schedule_view::DayScheduleView;

/// Eight rooms at the minimum column width overflow a 1200px window.
fn wide_board() -> BoardState {
    let mut day = Day::new(fixtures::conference_day());
    day.rooms = fixtures::rooms(8);
    day.slots = fixtures::even_slots(3, 30);

    let mut board = BoardState::new();
    board.set_schedule(LoadState::Loaded(Schedule { days: vec![day] }));
    board.unassigned = LoadState::Loaded(fixtures::unassigned_items());
    board
}

/// Drag a placed item and release it at `pointer` in one frame.
fn release_grid_item_at(pointer: Pos2) -> Option<DropOutcome> {
    let ctx = egui::Context::default();
    let mut board = wide_board();
    let mut tray = SidePanelState::default();
    let mut session = DragSession::new();

    let item = fixtures::talk("x", "Borrowing for beginners", &["r1"]);
    let handle = session.make_draggable(DragPayload::from_grid(&item, "s1"));
    assert!(session.begin(handle));

    let input = RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(1200.0, 800.0))),
        events: vec![Event::PointerMoved(pointer)],
        ..Default::default()
    };

    let mut outcome = None;
    let _ = ctx.run(input, |ctx| {
        DragManager::begin_frame(&mut session);
        let unassigned = board.unassigned.clone();
        render_side_panel(ctx, &mut tray, &unassigned, &mut session);
        egui::CentralPanel::default().show(ctx, |ui| {
            DayScheduleView::show(ui, &mut board, &mut session);
        });
        outcome = DragManager::finish_frame(ctx, &mut session);
    });
    outcome
}

#[test]
fn test_release_over_tray_unassigns_despite_hidden_cells_beneath() {
    // the seventh room's column continues under the tray at this point
    let outcome = release_grid_item_at(pos2(1100.0, 200.0));

    match outcome {
        Some(DropOutcome::Unassign { item }) => assert_eq!(item.id, "x"),
        other => panic!("expected an unassign, got {:?}", other),
    }
}

#[test]
fn test_release_over_visible_cell_assigns_there() {
    let outcome = release_grid_item_at(pos2(130.0, 80.0));

    match outcome {
        Some(DropOutcome::Assign { slot_id, room_id, .. }) => {
            assert_eq!((slot_id.as_str(), room_id.as_str()), ("s1", "r1"));
        }
        other => panic!("expected an assign, got {:?}", other),
    }
}
