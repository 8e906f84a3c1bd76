use std::cell::RefCell;
use std::rc::Rc;

use crate::items::MenuItem;
use crate::surface::{DisplayGeometry, Surface, TextStyle};

/// Entry alphabet used when the caller does not supply one: printable ASCII.
pub const DEFAULT_VALID_CHARS: &str = "abcdefghijklmnopqrstuvwxyz\
     ABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890!\"#$%&'()*+,-./:;<=>?@[\\]^_ `{|}~";

/// Mask position that accepts a user-entered character. Any other mask
/// character is fixed decoration printed verbatim. A private-use-area
/// scalar so it cannot collide with an entry alphabet.
pub const MASK_SLOT: char = '\u{F8FF}';

/// Cursor state machine of a [`StringEntry`], advanced cyclically by the
/// back gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryMode {
    /// Read/navigate only; scroll gestures fall through to the page.
    Hover,
    /// Cursor movement and backspace.
    SelectChar,
    /// Character proposal and insert/replace.
    Overwrite,
}

/// Editable, optionally masked text field.
///
/// The working buffer holds the user-entered characters only; when a mask is
/// configured its sentinel slots consume buffer characters in order and the
/// literal characters pass through, so committed text never silently drops
/// entered characters. The buffer is written back to the caller-owned target
/// string only at commit points (backspace, overwrite), never on cursor
/// movement.
pub struct StringEntry {
    name: String,
    selectable: bool,
    selected: bool,
    valid_chars: Vec<char>,
    mask: Vec<char>,
    buffer: Vec<char>,
    target: Option<Rc<RefCell<String>>>,
    mode: EntryMode,
    cursor_idx: usize,
    char_idx: usize,
    cursor_visible: bool,
    blink_counter: u8,
    blink_interval: u8,
    max_viewable: usize,
}

impl StringEntry {
    /// Editable field with the default alphabet and no mask.
    #[must_use]
    pub fn new(name: &str, target: &Rc<RefCell<String>>, geometry: DisplayGeometry) -> Self {
        Self::with_format(name, target, DEFAULT_VALID_CHARS, "", geometry)
    }

    /// Editable field with an explicit entry alphabet and mask template.
    ///
    /// `target` holds the committed (masked) text; the slot contents are
    /// extracted back out of it to seed the working buffer.
    #[must_use]
    pub fn with_format(
        name: &str,
        target: &Rc<RefCell<String>>,
        valid_chars: &str,
        mask: &str,
        geometry: DisplayGeometry,
    ) -> Self {
        let mask: Vec<char> = mask.chars().collect();
        let buffer = extract_slots(&target.borrow(), &mask);
        Self {
            name: name.to_string(),
            selectable: true,
            selected: false,
            valid_chars: valid_chars.chars().collect(),
            mask,
            buffer,
            target: Some(Rc::clone(target)),
            mode: EntryMode::Hover,
            cursor_idx: 0,
            char_idx: 0,
            cursor_visible: true,
            blink_counter: 0,
            blink_interval: geometry.blink_interval,
            max_viewable: max_viewable(name, geometry),
        }
    }

    /// Display-only field: shows `text`, never enters an edit mode and is
    /// skipped by hover movement.
    #[must_use]
    pub fn display_only(name: &str, text: &str, geometry: DisplayGeometry) -> Self {
        Self {
            name: name.to_string(),
            selectable: false,
            selected: false,
            valid_chars: Vec::new(),
            mask: Vec::new(),
            buffer: text.chars().collect(),
            target: None,
            mode: EntryMode::Hover,
            cursor_idx: 0,
            char_idx: 0,
            cursor_visible: true,
            blink_counter: 0,
            blink_interval: geometry.blink_interval,
            max_viewable: max_viewable(name, geometry),
        }
    }

    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.target.is_some()
    }

    #[must_use]
    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    /// Replace the shown text without touching the target string.
    pub fn set_display_text(&mut self, text: &str) {
        self.buffer = extract_slots(text, &self.mask);
        self.cursor_idx = self.cursor_idx.min(self.max_cursor());
    }

    /// Number of editable slots, when a mask is configured.
    fn slot_count(&self) -> Option<usize> {
        if self.mask.is_empty() {
            None
        } else {
            Some(self.mask.iter().filter(|&&m| m == MASK_SLOT).count())
        }
    }

    /// Highest position the cursor may occupy in the current mode. In
    /// overwrite mode the cursor may sit one past the last character (the
    /// append position), bounded by the mask's slot count.
    fn max_cursor(&self) -> usize {
        match self.mode {
            EntryMode::Overwrite => match self.slot_count() {
                Some(slots) => self.buffer.len().min(slots.saturating_sub(1)),
                None => self.buffer.len(),
            },
            EntryMode::Hover | EntryMode::SelectChar => self.buffer.len().saturating_sub(1),
        }
    }

    /// Index into the alphabet of the character under the cursor, or 0 when
    /// the cursor sits past the end or the character is not in the alphabet.
    fn primed_char_index(&self) -> usize {
        self.buffer
            .get(self.cursor_idx)
            .and_then(|under| self.valid_chars.iter().position(|&c| c == *under))
            .unwrap_or(0)
    }

    fn scroll_cursor(&mut self, reverse: bool) {
        let max = self.max_cursor();
        self.cursor_idx = if reverse {
            self.cursor_idx.saturating_sub(1)
        } else {
            self.cursor_idx.saturating_add(1)
        }
        .min(max);
        self.cursor_visible = true;
        self.blink_counter = 0;
    }

    fn scroll_proposal(&mut self, reverse: bool) {
        if self.valid_chars.is_empty() {
            return;
        }
        let len = self.valid_chars.len();
        self.char_idx = if reverse {
            self.char_idx.checked_sub(1).unwrap_or(len - 1)
        } else {
            (self.char_idx + 1) % len
        };
    }

    /// Write the proposed character at the cursor, appending when the
    /// cursor sits past the buffer end, then advance and re-prime.
    fn do_overwrite(&mut self) {
        let Some(&entered) = self.valid_chars.get(self.char_idx.min(
            self.valid_chars.len().saturating_sub(1),
        )) else {
            return;
        };

        if self.cursor_idx >= self.buffer.len() {
            if self
                .slot_count()
                .is_some_and(|slots| self.buffer.len() >= slots)
            {
                log::info!("'{}': every mask slot is filled", self.name);
                return;
            }
            self.buffer.push(entered);
        } else {
            self.buffer[self.cursor_idx] = entered;
        }

        self.scroll_cursor(false);
        self.char_idx = self.primed_char_index();
        self.commit();
    }

    fn do_backspace(&mut self) {
        if self.cursor_idx >= self.buffer.len() {
            // Nothing under the cursor (covers the empty buffer)
            return;
        }
        self.buffer.remove(self.cursor_idx);
        self.cursor_idx = self.cursor_idx.saturating_sub(1);
        self.commit();
    }

    /// Combine the buffer with the mask and replace the target's contents.
    fn commit(&mut self) {
        if let Some(target) = &self.target {
            *target.borrow_mut() = apply_mask(&self.buffer, &self.mask).into_iter().collect();
        }
    }

    /// Display column of the cursor within the masked text.
    fn cursor_column(&self, masked_len: usize) -> usize {
        if self.mask.is_empty() {
            return self.cursor_idx;
        }
        let mut slot = 0;
        for (column, &m) in self.mask.iter().enumerate() {
            if m == MASK_SLOT {
                if slot == self.cursor_idx {
                    return column;
                }
                slot += 1;
            }
        }
        masked_len
    }

    fn tick_blink(&mut self) {
        self.blink_counter = self.blink_counter.saturating_add(1);
        if self.blink_counter >= self.blink_interval {
            self.cursor_visible = !self.cursor_visible;
            self.blink_counter = 0;
        }
    }
}

impl<S: Surface> MenuItem<S> for StringEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_selectable(&self) -> bool {
        self.selectable
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, state: bool) {
        if self.selectable {
            self.selected = state;
        }
    }

    fn scroll_forward(&mut self) -> bool {
        match self.mode {
            EntryMode::Hover => false,
            EntryMode::SelectChar => {
                self.scroll_cursor(false);
                true
            }
            EntryMode::Overwrite => {
                self.scroll_proposal(false);
                true
            }
        }
    }

    fn scroll_backward(&mut self) -> bool {
        match self.mode {
            EntryMode::Hover => false,
            EntryMode::SelectChar => {
                self.scroll_cursor(true);
                true
            }
            EntryMode::Overwrite => {
                self.scroll_proposal(true);
                true
            }
        }
    }

    fn handle_select(&mut self) -> bool {
        match self.mode {
            EntryMode::Hover => {}
            EntryMode::SelectChar => self.do_backspace(),
            EntryMode::Overwrite => self.do_overwrite(),
        }
        true
    }

    /// Cycle HOVER -> SELECT_CHAR -> OVERWRITE -> HOVER. An empty buffer
    /// short-circuits straight to overwrite, since there is nothing to
    /// select and delete.
    fn handle_back(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }

        self.mode = match self.mode {
            EntryMode::Hover if self.buffer.is_empty() => EntryMode::Overwrite,
            EntryMode::Hover => EntryMode::SelectChar,
            EntryMode::SelectChar => EntryMode::Overwrite,
            EntryMode::Overwrite => EntryMode::Hover,
        };

        match self.mode {
            EntryMode::Overwrite => {
                self.cursor_idx = self.cursor_idx.min(self.max_cursor());
                self.char_idx = self.primed_char_index();
            }
            EntryMode::SelectChar => {
                self.cursor_idx = self.cursor_idx.min(self.max_cursor());
                self.cursor_visible = true;
                self.blink_counter = 0;
            }
            EntryMode::Hover => {}
        }
        true
    }

    fn draw(&mut self, surface: &mut S) -> Result<(), S::Error> {
        surface.set_style(TextStyle::Normal);
        if self.selected {
            let marker = match self.mode {
                EntryMode::Hover => ">",
                EntryMode::SelectChar => "_",
                EntryMode::Overwrite => "+",
            };
            surface.print(marker)?;
        } else {
            surface.print(" ")?;
        }
        surface.print(&self.name)?;
        surface.print(":")?;

        let masked = apply_mask(&self.buffer, &self.mask);

        if self.mode == EntryMode::Hover {
            if self.selected && self.is_editable() {
                surface.set_style(TextStyle::Inverted);
            }
            let text: String = masked.iter().collect();
            surface.println(&text)?;
            return Ok(());
        }

        // Edit modes split the text around a blinking cursor cell and
        // scroll the window so the cursor stays on screen.
        self.tick_blink();

        let cursor_col = self.cursor_column(masked.len());
        let trim = cursor_col.saturating_sub(self.max_viewable.saturating_sub(1));

        let before: String = masked[trim.min(masked.len())..cursor_col.min(masked.len())]
            .iter()
            .collect();
        let after: String = if cursor_col + 1 < masked.len() {
            masked[cursor_col + 1..].iter().collect()
        } else {
            String::new()
        };

        surface.print(&before)?;

        surface.set_style(if self.cursor_visible {
            TextStyle::Inverted
        } else {
            TextStyle::Normal
        });
        let cursor_char = match self.mode {
            EntryMode::Overwrite => self
                .valid_chars
                .get(self.char_idx)
                .copied()
                .unwrap_or(' '),
            EntryMode::Hover | EntryMode::SelectChar => {
                masked.get(cursor_col).copied().unwrap_or(' ')
            }
        };
        surface.print_char(cursor_char)?;

        surface.set_style(TextStyle::Normal);
        surface.println(&after)
    }
}

/// Viewable character budget after the marker, name and colon.
fn max_viewable(name: &str, geometry: DisplayGeometry) -> usize {
    geometry
        .columns()
        .saturating_sub(name.chars().count() + 2)
        .max(1)
}

/// Combine entered characters with the mask template: sentinel slots
/// consume input characters in order, literals pass through verbatim.
/// Output stops at the first unfilled slot. Without a mask the input is
/// returned unchanged.
fn apply_mask(input: &[char], mask: &[char]) -> Vec<char> {
    if mask.is_empty() {
        return input.to_vec();
    }
    let mut filled = input.iter();
    let mut output = Vec::with_capacity(mask.len());
    for &m in mask {
        if m == MASK_SLOT {
            match filled.next() {
                Some(&ch) => output.push(ch),
                None => break,
            }
        } else {
            output.push(m);
        }
    }
    output
}

/// Inverse of [`apply_mask`] for previously committed text: collect the
/// characters sitting in sentinel positions.
fn extract_slots(text: &str, mask: &[char]) -> Vec<char> {
    if mask.is_empty() {
        return text.chars().collect();
    }
    text.chars()
        .zip(mask.iter())
        .filter(|&(_, &m)| m == MASK_SLOT)
        .map(|(ch, _)| ch)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TextBuffer;

    fn geometry() -> DisplayGeometry {
        DisplayGeometry::default()
    }

    fn entry(initial: &str) -> (StringEntry, Rc<RefCell<String>>) {
        let target = Rc::new(RefCell::new(initial.to_string()));
        let entry = StringEntry::with_format("Name", &target, "AB", "", geometry());
        (entry, target)
    }

    fn masked_entry(initial: &str, mask: &str) -> (StringEntry, Rc<RefCell<String>>) {
        let target = Rc::new(RefCell::new(initial.to_string()));
        let entry = StringEntry::with_format("Name", &target, "AB", mask, geometry());
        (entry, target)
    }

    // Shorthand: drive the widget through the TextBuffer-typed impl.
    fn cycle(entry: &mut StringEntry) {
        assert!(MenuItem::<TextBuffer>::handle_back(entry));
    }

    fn select(entry: &mut StringEntry) {
        assert!(MenuItem::<TextBuffer>::handle_select(entry));
    }

    fn scroll_forward(entry: &mut StringEntry) -> bool {
        MenuItem::<TextBuffer>::scroll_forward(entry)
    }

    fn scroll_backward(entry: &mut StringEntry) -> bool {
        MenuItem::<TextBuffer>::scroll_backward(entry)
    }

    #[test]
    fn mode_cycle_is_three_long_with_content() {
        let (mut entry, _target) = entry("AB");
        assert_eq!(entry.mode(), EntryMode::Hover);
        cycle(&mut entry);
        assert_eq!(entry.mode(), EntryMode::SelectChar);
        cycle(&mut entry);
        assert_eq!(entry.mode(), EntryMode::Overwrite);
        cycle(&mut entry);
        assert_eq!(entry.mode(), EntryMode::Hover);
        cycle(&mut entry);
        assert_eq!(entry.mode(), EntryMode::SelectChar);
    }

    #[test]
    fn empty_buffer_short_circuits_to_overwrite() {
        let (mut entry, _target) = entry("");
        cycle(&mut entry);
        assert_eq!(entry.mode(), EntryMode::Overwrite);
    }

    #[test]
    fn display_only_field_declines_the_back_gesture() {
        let mut entry = StringEntry::display_only("FW", "1.0.3", geometry());
        assert!(!MenuItem::<TextBuffer>::handle_back(&mut entry));
        assert_eq!(entry.mode(), EntryMode::Hover);
    }

    #[test]
    fn hover_declines_scrolls_and_consumes_select() {
        let (mut entry, target) = entry("AB");
        assert!(!scroll_forward(&mut entry));
        assert!(!scroll_backward(&mut entry));
        select(&mut entry);
        assert_eq!(*target.borrow(), "AB", "hover select must not commit");
    }

    #[test]
    fn overwrite_on_empty_buffer_writes_two_chars() {
        // validChars = "AB": both writes propose 'A' because the primed
        // index re-reads an empty position after each advance.
        let (mut entry, target) = entry("");
        cycle(&mut entry); // straight to overwrite
        select(&mut entry);
        select(&mut entry);
        assert_eq!(*target.borrow(), "AA");
        assert_eq!(entry.cursor_idx, 2);
    }

    #[test]
    fn overwrite_primes_proposal_from_character_under_cursor() {
        let (mut entry, _target) = entry("B");
        cycle(&mut entry); // select-char, cursor on 'B'
        cycle(&mut entry); // overwrite
        assert_eq!(entry.char_idx, 1, "'B' sits at index 1 of the alphabet");
    }

    #[test]
    fn overwrite_replaces_in_place_before_the_end() {
        let (mut entry, target) = entry("BB");
        cycle(&mut entry); // select-char, cursor at 0
        cycle(&mut entry); // overwrite, proposes 'B'
        scroll_forward(&mut entry); // cycle proposal B -> A
        select(&mut entry);
        assert_eq!(*target.borrow(), "AB");
        assert_eq!(entry.cursor_idx, 1);
    }

    #[test]
    fn proposal_wraps_in_both_directions() {
        let (mut entry, _target) = entry("");
        cycle(&mut entry); // overwrite, proposal 'A'
        scroll_backward(&mut entry);
        assert_eq!(entry.char_idx, 1, "backward from 'A' wraps to 'B'");
        scroll_forward(&mut entry);
        assert_eq!(entry.char_idx, 0);
    }

    #[test]
    fn backspace_removes_at_cursor_and_steps_back() {
        let (mut entry, target) = entry("AB");
        cycle(&mut entry); // select-char
        scroll_forward(&mut entry); // cursor to 1
        select(&mut entry); // backspace
        assert_eq!(*target.borrow(), "A");
        assert_eq!(entry.cursor_idx, 0);
    }

    #[test]
    fn backspace_on_empty_buffer_is_a_no_op() {
        // Deleting the last character leaves select-char mode on an empty
        // buffer; further backspaces and cursor moves must not underflow.
        let (mut entry, target) = entry("A");
        cycle(&mut entry); // select-char
        select(&mut entry); // delete the only character
        assert_eq!(*target.borrow(), "");

        select(&mut entry);
        assert_eq!(*target.borrow(), "");
        assert_eq!(entry.cursor_idx, 0);

        assert!(scroll_backward(&mut entry));
        assert!(scroll_forward(&mut entry));
        assert_eq!(entry.cursor_idx, 0);
    }

    #[test]
    fn cursor_clamps_at_both_buffer_ends_in_select_char() {
        let (mut entry, _target) = entry("AB");
        cycle(&mut entry);
        scroll_backward(&mut entry);
        assert_eq!(entry.cursor_idx, 0);
        scroll_forward(&mut entry);
        scroll_forward(&mut entry);
        scroll_forward(&mut entry);
        assert_eq!(entry.cursor_idx, 1, "select-char stops on the last char");
    }

    #[test]
    fn overwrite_cursor_may_sit_one_past_the_end() {
        let (mut entry, _target) = entry("A");
        cycle(&mut entry); // select-char
        cycle(&mut entry); // overwrite
        scroll_forward(&mut entry);
        scroll_forward(&mut entry);
        assert_eq!(entry.cursor_idx, 0, "proposal scrolling leaves the cursor");
        select(&mut entry); // replace, advances to append position
        assert_eq!(entry.cursor_idx, 1);
    }

    #[test]
    fn commit_applies_the_mask_template() {
        let mask = format!("{MASK_SLOT}{MASK_SLOT}-{MASK_SLOT}");
        let (mut entry, target) = masked_entry("", &mask);
        cycle(&mut entry); // overwrite
        select(&mut entry);
        select(&mut entry);
        assert_eq!(*target.borrow(), "AA-");
        select(&mut entry);
        assert_eq!(*target.borrow(), "AA-A");
    }

    #[test]
    fn full_mask_replaces_the_last_slot_instead_of_growing() {
        let mask = format!("{MASK_SLOT}{MASK_SLOT}");
        let (mut entry, target) = masked_entry("AA", &mask);
        cycle(&mut entry); // select-char
        cycle(&mut entry); // overwrite, cursor on slot 0, proposes 'A'
        scroll_forward(&mut entry); // proposal A -> B
        select(&mut entry); // writes 'B' at slot 0, cursor moves to slot 1
        select(&mut entry); // proposal re-primed to 'A', replaces slot 1
        assert_eq!(*target.borrow(), "BA", "writes stay within the slots");
        assert_eq!(entry.cursor_idx, 1, "cursor cannot leave the last slot");
    }

    #[test]
    fn buffer_is_seeded_from_committed_masked_text() {
        let mask = format!("{MASK_SLOT}{MASK_SLOT}-{MASK_SLOT}");
        let (entry, _target) = masked_entry("AB-A", &mask);
        assert_eq!(entry.buffer, vec!['A', 'B', 'A']);
    }

    #[test]
    fn apply_mask_without_mask_is_identity() {
        let input: Vec<char> = "hello".chars().collect();
        assert_eq!(apply_mask(&input, &[]), input);
    }

    #[test]
    fn apply_mask_fills_slots_in_order_and_keeps_literals() {
        let mask: Vec<char> = format!("({MASK_SLOT}{MASK_SLOT}){MASK_SLOT}")
            .chars()
            .collect();
        let input: Vec<char> = "xyz".chars().collect();
        let output: String = apply_mask(&input, &mask).into_iter().collect();
        assert_eq!(output, "(xy)z");
    }

    #[test]
    fn apply_mask_stops_at_the_first_unfilled_slot() {
        let mask: Vec<char> = format!("{MASK_SLOT}{MASK_SLOT}-{MASK_SLOT}{MASK_SLOT}")
            .chars()
            .collect();
        let input: Vec<char> = "ab".chars().collect();
        let output: String = apply_mask(&input, &mask).into_iter().collect();
        assert_eq!(output, "ab-");
    }

    #[test]
    fn extract_slots_inverts_apply_mask() {
        let mask: Vec<char> = format!("+{MASK_SLOT}{MASK_SLOT}.{MASK_SLOT}")
            .chars()
            .collect();
        let input: Vec<char> = "abc".chars().collect();
        let committed: String = apply_mask(&input, &mask).into_iter().collect();
        assert_eq!(extract_slots(&committed, &mask), input);
    }

    #[test]
    fn hover_draw_shows_masked_text_inverted_when_selected() {
        let mask = format!("{MASK_SLOT}{MASK_SLOT}-{MASK_SLOT}");
        let (mut entry, _target) = masked_entry("AB-A", &mask);
        MenuItem::<TextBuffer>::set_selected(&mut entry, true);

        let mut surface = TextBuffer::new(21, 2);
        MenuItem::draw(&mut entry, &mut surface).unwrap();

        assert_eq!(surface.row_text(0), ">Name:AB-A");
        assert!(surface.cell(6, 0).inverted, "buffer text renders inverted");
        assert!(!surface.cell(1, 0).inverted, "name stays normal");
    }

    #[test]
    fn edit_draw_places_the_cursor_on_a_slot_column() {
        let mask = format!("{MASK_SLOT}{MASK_SLOT}-{MASK_SLOT}");
        let (mut entry, _target) = masked_entry("AB-A", &mask);
        MenuItem::<TextBuffer>::set_selected(&mut entry, true);
        cycle(&mut entry); // select-char, cursor on slot 0
        scroll_forward(&mut entry);
        scroll_forward(&mut entry); // slot 2, display column 3

        let mut surface = TextBuffer::new(21, 2);
        MenuItem::draw(&mut entry, &mut surface).unwrap();

        assert_eq!(surface.row_text(0), "_Name:AB-A");
        assert!(surface.cell(9, 0).inverted, "cursor cell blinks inverted");
        assert!(!surface.cell(8, 0).inverted, "literal '-' is skipped");
    }

    #[test]
    fn edit_draw_scrolls_the_window_past_the_budget() {
        // 21 columns, name "Name" -> budget of 15 viewable characters.
        let target = Rc::new(RefCell::new("abcdefghijklmnopqrst".to_string()));
        let mut entry =
            StringEntry::with_format("Name", &target, DEFAULT_VALID_CHARS, "", geometry());
        MenuItem::<TextBuffer>::set_selected(&mut entry, true);
        cycle(&mut entry); // select-char
        for _ in 0..19 {
            scroll_forward(&mut entry);
        }
        assert_eq!(entry.cursor_idx, 19);

        let mut surface = TextBuffer::new(21, 2);
        MenuItem::draw(&mut entry, &mut surface).unwrap();

        // Window trimmed so the cursor ('t') is the last visible character.
        assert_eq!(surface.row_text(0), "_Name:fghijklmnopqrst");
    }
}
