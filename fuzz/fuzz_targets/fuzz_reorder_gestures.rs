#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tray_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tray_core::geometry::Rect;
use tray_render::frame::Frame;
use tray_widgets::{
    Board, BoardLayout, CollapsedSet, Container, IntentLog, ReorderConfig, ReorderCoordinator,
    ReorderEvent, SortableBoard, Widget,
};
use web_time::{Duration, Instant};

#[derive(Debug, Arbitrary)]
enum Input {
    Down { x: u8, y: u8, right: bool },
    Drag { x: u8, y: u8 },
    Up { x: u8, y: u8 },
    /// Release on the first row below the last container.
    UpBelow { x: u8 },
    Escape,
    Blur,
    Toggle(u8),
}

#[derive(Debug, Arbitrary)]
struct Session {
    /// Items per container (each taken modulo 6, at most 6 containers).
    sizes: Vec<u8>,
    threshold: u8,
    width: u8,
    inputs: Vec<Input>,
}

fn build_board(sizes: &[u8]) -> Board {
    let containers = sizes
        .iter()
        .take(6)
        .enumerate()
        .map(|(c, &n)| {
            (0..n % 6).fold(Container::new(format!("c{c}"), format!("C{c}")), |acc, i| {
                acc.with_item(format!("i{c}-{i}"), format!("Item {i}"))
            })
        })
        .collect();
    Board::new(containers).expect("generated ids are unique")
}

fn to_event(input: &Input, layout: &BoardLayout) -> Event {
    let mouse = |kind, x: u8, y: u8| Event::Mouse(MouseEvent::new(kind, u16::from(x % 64), u16::from(y % 48)));
    match *input {
        Input::Down { x, y, right } => {
            let button = if right { MouseButton::Right } else { MouseButton::Left };
            mouse(MouseEventKind::Down(button), x, y)
        }
        Input::Drag { x, y } => mouse(MouseEventKind::Drag(MouseButton::Left), x, y),
        Input::Up { x, y } => mouse(MouseEventKind::Up(MouseButton::Left), x, y),
        Input::UpBelow { x } => Event::Mouse(MouseEvent::new(
            MouseEventKind::Up(MouseButton::Left),
            u16::from(x % 64),
            layout.area.y.saturating_add(layout.content_height),
        )),
        Input::Escape => Event::Key(KeyEvent::new(KeyCode::Escape)),
        Input::Blur => Event::Focus(false),
        Input::Toggle(_) => Event::Focus(true),
    }
}

fuzz_target!(|session: Session| {
    let mut board = build_board(&session.sizes);
    let config = ReorderConfig::default().with_threshold(u16::from(session.threshold % 8).max(1));
    let area = Rect::new(0, 0, u16::from(session.width % 64).max(4), 48);
    let mut collapsed = CollapsedSet::default();
    let mut layout = BoardLayout::compute(&board, area, &collapsed, &config);
    let mut coord = ReorderCoordinator::new(config.clone());
    let mut log = IntentLog::new();
    let total_items = board.item_count();
    let t0 = Instant::now();

    for (step, input) in session.inputs.iter().take(256).enumerate() {
        if let Input::Toggle(n) = *input
            && !board.is_empty()
            && !coord.is_dragging()
        {
            let id = board.containers()[usize::from(n) % board.len()].id.clone();
            if !collapsed.remove(&id) {
                collapsed.insert(id);
            }
            layout = BoardLayout::compute(&board, area, &collapsed, &config);
        }

        let now = t0 + Duration::from_millis(step as u64 * 16);
        let event = to_event(input, &layout);
        let below_board = matches!(
            event,
            Event::Mouse(MouseEvent { y, .. }) if y >= layout.area.y.saturating_add(layout.content_height)
        );
        if let Some(intent) = coord.handle_event_at(&event, now, &board, &layout, &mut log) {
            assert!(!below_board, "release over empty space produced {intent:?}");
            board.apply(&intent).expect("reported intents always apply");
            layout = BoardLayout::compute(&board, area, &collapsed, &config);
        }

        let mut frame = Frame::new(area.width, area.height);
        SortableBoard::new(&board, &layout, &coord).render(area, &mut frame);
    }

    // Callback bracketing.
    let mut open = false;
    let mut intents = 0;
    for event in &log.events {
        match event {
            ReorderEvent::DragStart(_) => {
                assert!(!open, "nested session");
                open = true;
                intents = 0;
            }
            ReorderEvent::Intent(_) => {
                assert!(open, "intent outside a session");
                intents += 1;
                assert!(intents <= 1, "two intents in one session");
            }
            ReorderEvent::DragEnd => {
                assert!(open, "end without start");
                open = false;
            }
            ReorderEvent::CollapseToggle(_) => assert!(!open, "toggle during a drag"),
        }
    }
    assert_eq!(open, coord.is_dragging());
    assert_eq!(board.item_count(), total_items, "items lost or duplicated");
});
