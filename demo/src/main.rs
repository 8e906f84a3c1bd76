//! Terminal front-end for the oledmenu framework.
//!
//! Frames render through the headless [`TextBuffer`] surface; a reader
//! thread classifies single-character stdin commands into encoder events
//! and feeds them over a channel to the menu loop:
//!
//! `j`/`k` rotate, `s` select (release), `b` back (long-press),
//! `d` double-click, `p` pop the current page, `q` quit.

use std::cell::RefCell;
use std::io::BufRead;
use std::rc::Rc;
use std::thread;

use crossbeam_channel::unbounded;
use oledmenu::surface::TextBuffer;
use oledmenu::{
    DisplayGeometry, InputEvent, Item, MASK_SLOT, Menu, Page, StringEntry, ToggleEntry,
};

const DISPLAY_ROWS: usize = 8;

#[derive(Clone, Copy, Debug)]
enum Command {
    Forward,
    Backward,
    Input(InputEvent),
    Pop,
    Quit,
}

fn classify(ch: char) -> Option<Command> {
    match ch {
        'j' => Some(Command::Forward),
        'k' => Some(Command::Backward),
        's' => Some(Command::Input(InputEvent::Release)),
        'b' => Some(Command::Input(InputEvent::LongPress)),
        'd' => Some(Command::Input(InputEvent::DoubleClick)),
        'p' => Some(Command::Pop),
        'q' => Some(Command::Quit),
        _ => None,
    }
}

/// Dump one frame to stdout, inverted cells in ANSI reverse video.
fn render(surface: &TextBuffer) {
    let border: String = std::iter::once('+')
        .chain(std::iter::repeat_n('-', surface.columns()))
        .chain(std::iter::once('+'))
        .collect();

    let mut frame = String::new();
    frame.push_str(&border);
    frame.push('\n');
    for row in 0..surface.rows() {
        frame.push('|');
        for col in 0..surface.columns() {
            let cell = surface.cell(col, row);
            if cell.inverted {
                frame.push_str("\x1b[7m");
                frame.push(cell.glyph);
                frame.push_str("\x1b[0m");
            } else {
                frame.push(cell.glyph);
            }
        }
        frame.push_str("|\n");
    }
    frame.push_str(&border);
    println!("{frame}");
}

fn main() {
    env_logger::init();

    let (sender, receiver) = unbounded();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for ch in line.chars() {
                if let Some(command) = classify(ch) {
                    if sender.send(command).is_err() {
                        return;
                    }
                }
            }
        }
        let _ = sender.send(Command::Quit);
    });

    let geometry = DisplayGeometry::default();
    let device_name = Rc::new(RefCell::new("anon".to_string()));
    let pin = Rc::new(RefCell::new(String::new()));
    let pin_mask = format!("{slot}{slot}-{slot}{slot}", slot = MASK_SLOT);

    let settings = Page::shared("Settings");
    let mode = Rc::new(RefCell::new(ToggleEntry::new(
        "Mode",
        &["Off", "Slow", "Fast"],
    )));
    {
        let mut page = settings.borrow_mut();
        page.add(StringEntry::new("Name", &device_name, geometry));
        page.add(StringEntry::with_format(
            "Pin",
            &pin,
            "0123456789",
            &pin_mask,
            geometry,
        ));
        page.add_item(mode.clone());
    }

    let root = Page::shared("Main");
    {
        let mut page = root.borrow_mut();
        page.add(Item::submenu("Settings", &settings));
        page.add(Item::action("Ping", || log::info!("ping")));
        page.add(StringEntry::display_only(
            "FW",
            env!("CARGO_PKG_VERSION"),
            geometry,
        ));
    }

    let mut menu = Menu::new();
    menu.add_page(Rc::clone(&root));
    menu.add_page(Rc::clone(&settings));
    menu.push_page(root);

    let mut surface = TextBuffer::new(geometry.columns(), DISPLAY_ROWS);
    if menu.draw(&mut surface).is_ok() {
        render(&surface);
    }

    for command in receiver {
        match command {
            Command::Forward => menu.scroll_forward(),
            Command::Backward => menu.scroll_backward(),
            Command::Input(event) => menu.handle_input(event),
            Command::Pop => {
                if menu.depth() > 1 {
                    menu.pop_page();
                } else {
                    log::warn!("already at the root page");
                }
            }
            Command::Quit => break,
        }
        if menu.draw(&mut surface).is_ok() {
            render(&surface);
        }
    }

    log::info!(
        "final settings: name='{}' pin='{}' mode='{}'",
        device_name.borrow(),
        pin.borrow(),
        mode.borrow().selected_value()
    );
}
