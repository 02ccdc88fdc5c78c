//! Engine: one explicit value holding all UI state, driven once per frame.
//!
//! The caller contract per input sample is
//!
//! 1. [`Engine::update_input`] feeds the sample to the gesture detector and
//!    resolves key bindings,
//! 2. [`Engine::update_layout`] recomputes selectors and the style cascade,
//! 3. [`Engine::update_behaviors`] advances every button and text entry,
//! 4. the caller reads outputs ([`Engine::button_activated`],
//!    [`LayoutBox::content_changed`], ...) and paints,
//! 5. [`Engine::end_frame`] clears the per-frame flags.
//!
//! [`Engine::process_frame`] runs steps 1 to 3. Between frames the caller may
//! rebuild its panel with [`Engine::begin_rebuild`] / [`Engine::end_rebuild`].

use crate::behavior::{
    BehaviorId, BehaviorKind, BehaviorSet, ButtonBehavior, EntryEffect, EntryInput, IntString,
    Selection, TextEntryBehavior,
};
use crate::css::style::{Font, SelectorFlags, TextAlign};
use crate::css::table::{StyleError, StyleId, StyleTable};
use crate::event::binding::{EngineAction, KeyBindingRegistry};
use crate::event::clipboard::{ClipboardBackend, ClipboardState};
use crate::event::gesture::GestureDetector;
use crate::event::input::{InputFrame, KeyEvent, MouseButton};
use crate::focus::FocusChain;
use crate::geometry::{Rect, Size, Vec2};
use crate::layout::{BoxId, BoxRegistry, LayoutBox, Paint, PaintFn};
use crate::render::box_painter::{paint_box, PaintContext};
use crate::render::painter::{NullBackend, Painter, TextMeasure};
use crate::selector::{apply_cascade, update_selectors, PointerState};

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Configuration for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Longest gap between two clicks that still makes a double-click.
    pub double_click_ms: f64,
    /// Pointer travel beyond which a held button is dragging.
    pub min_drag_distance: f64,
    /// Most boxes a single build pass may create.
    pub max_boxes: usize,
    /// Font used where a style leaves font fields unset.
    pub default_font: Font,
    /// Optional stylesheet applied on top of the built-in theme.
    pub css: Option<String>,
    /// Whether the default key bindings are installed.
    pub key_bindings: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            double_click_ms: 200.0,
            min_drag_distance: 3.0,
            max_boxes: 30,
            default_font: Font::default(),
            css: None,
            key_bindings: true,
        }
    }
}

impl EngineConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the double-click threshold (builder).
    pub fn with_double_click_ms(mut self, ms: f64) -> Self {
        self.double_click_ms = ms;
        self
    }

    /// Set the drag threshold (builder).
    pub fn with_min_drag_distance(mut self, distance: f64) -> Self {
        self.min_drag_distance = distance;
        self
    }

    /// Set the box capacity (builder).
    pub fn with_max_boxes(mut self, max: usize) -> Self {
        self.max_boxes = max;
        self
    }

    /// Set the default font (builder).
    pub fn with_default_font(mut self, font: Font) -> Self {
        self.default_font = font;
        self
    }

    /// Set the extra stylesheet (builder).
    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }

    /// Enable or disable the default key bindings (builder).
    pub fn with_key_bindings(mut self, enabled: bool) -> Self {
        self.key_bindings = enabled;
        self
    }
}

// ---------------------------------------------------------------------------
// FrameReport
// ---------------------------------------------------------------------------

/// What happened during one [`Engine::process_frame`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Something visible changed; the caller should repaint.
    pub redraw: bool,
    /// Custom binding actions triggered this frame, in order.
    pub actions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The UI engine.
///
/// Owns the style table, the boxes and behaviors of the current build pass,
/// the focus chain, gesture state, the text selection and the clipboard
/// plumbing.
pub struct Engine {
    config: EngineConfig,
    styles: StyleTable,
    boxes: BoxRegistry,
    focus: FocusChain,
    gestures: GestureDetector,
    behaviors: BehaviorSet,
    selection: Option<Selection>,
    clipboard: ClipboardState,
    clipboard_backend: Option<Box<dyn ClipboardBackend>>,
    bindings: KeyBindingRegistry,
    measure: Box<dyn TextMeasure>,

    /// Primary button held in the current sample.
    pointer_down: bool,
    /// Key of the current sample not consumed by a binding.
    key: Option<KeyEvent>,
    actions: Vec<String>,
    force_redraw: bool,
    /// Index of the box focused when the rebuild began.
    restore_focus: Option<usize>,
}

impl Engine {
    /// Create an engine with the built-in theme plus `config.css`.
    pub fn new(config: EngineConfig) -> Result<Self, StyleError> {
        let mut styles = StyleTable::with_default_theme()?;
        if let Some(css) = &config.css {
            styles.apply_css(css)?;
        }
        let bindings = if config.key_bindings {
            KeyBindingRegistry::with_defaults()
        } else {
            KeyBindingRegistry::new()
        };

        Ok(Self {
            boxes: BoxRegistry::new(config.max_boxes),
            gestures: GestureDetector::new(config.double_click_ms, config.min_drag_distance),
            focus: FocusChain::new(),
            behaviors: BehaviorSet::new(),
            selection: None,
            clipboard: ClipboardState::default(),
            clipboard_backend: None,
            bindings,
            measure: Box::new(NullBackend),
            pointer_down: false,
            key: None,
            actions: Vec::new(),
            force_redraw: false,
            restore_focus: None,
            styles,
            config,
        })
    }

    /// Measure text with `measure` instead of the zero-size fallback (builder).
    pub fn with_text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// Attach a clipboard backend (builder).
    pub fn with_clipboard(mut self, backend: impl ClipboardBackend + 'static) -> Self {
        self.clipboard_backend = Some(Box::new(backend));
        self
    }

    // ── Build pass ───────────────────────────────────────────────────

    /// Drop every box, behavior and focus node before the caller rebuilds
    /// its panel. The focused box index is remembered for
    /// [`end_rebuild`](Self::end_rebuild).
    pub fn begin_rebuild(&mut self) {
        self.restore_focus = self.focus.focused().map(BoxId::index);
        self.boxes.clear();
        self.behaviors.clear();
        self.focus.clear();
        self.selection = None;
    }

    /// Give focus back to the box that had it before the rebuild, if that
    /// box index is focusable again. No focus edge is recorded.
    pub fn end_rebuild(&mut self) {
        let Some(index) = self.restore_focus.take() else {
            return;
        };
        if let Some(id) = self.boxes.id_at(index) {
            if !self.focus.restore(&mut self.boxes, &self.styles, id) {
                log::debug!("box {index} focused before rebuild is no longer focusable");
            }
        }
    }

    /// Create a box with `style` as its base style.
    ///
    /// # Panics
    ///
    /// Panics when more than `max_boxes` boxes are created in one pass.
    pub fn add_box(&mut self, style: impl Into<StyleId>) -> BoxId {
        self.boxes.push(style.into())
    }

    pub fn box_ref(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id]
    }

    pub fn box_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id]
    }

    pub fn set_rect(&mut self, id: BoxId, rect: Rect) {
        self.boxes[id].rect = rect;
    }

    /// Place `id` at `origin`, sized to fit its content.
    pub fn place(&mut self, id: BoxId, origin: Vec2) {
        let size = self.layout_size(id);
        self.boxes[id].rect = Rect::from_origin_size(origin, size);
    }

    /// Set the box text, measured with its current style's font.
    pub fn set_text(&mut self, id: BoxId, text: impl Into<String>) {
        let text = text.into();
        let size = measure_box_text(
            self.measure.as_ref(),
            &self.styles,
            &self.config.default_font,
            &self.boxes[id],
            &text,
        );
        self.boxes[id].set_text(text, size);
    }

    pub fn set_text_align(&mut self, id: BoxId, align: TextAlign) {
        self.boxes[id].text_align = Some(align);
    }

    /// Paint `id` with `paint` instead of its style.
    pub fn set_custom_paint(&mut self, id: BoxId, paint: PaintFn) {
        self.boxes[id].paint = Paint::Custom(paint);
    }

    /// Set or clear the `DISABLED` selector. Disabling also drops `ACTIVE`.
    pub fn set_disabled(&mut self, id: BoxId, disabled: bool) {
        let lay = &mut self.boxes[id];
        if disabled {
            lay.selector_set(SelectorFlags::DISABLED);
            lay.selector_unset(SelectorFlags::ACTIVE);
        } else {
            lay.selector_unset(SelectorFlags::DISABLED);
        }
    }

    /// Border-box size `id` needs for its content under its current style.
    pub fn layout_size(&self, id: BoxId) -> Size {
        let lay = &self.boxes[id];
        LayoutBox::size_for_content(self.styles.get(lay.current_style), lay.content.size())
    }

    // ── Focus ────────────────────────────────────────────────────────

    /// Append `id` to the focus chain.
    pub fn add_focusable(&mut self, id: BoxId) {
        self.focus.add(&mut self.boxes, &self.styles, id);
    }

    pub fn remove_focusable(&mut self, id: BoxId) {
        self.focus.remove(&mut self.boxes, id);
    }

    /// Move focus to `id`.
    ///
    /// # Panics
    ///
    /// Panics if the focus chain is empty.
    pub fn set_focus(&mut self, id: BoxId) {
        self.focus.focus_box(&mut self.boxes, id);
    }

    /// # Panics
    ///
    /// Panics if the focus chain is empty.
    pub fn focus_next(&mut self) -> BoxId {
        self.focus.focus_next(&mut self.boxes)
    }

    /// # Panics
    ///
    /// Panics if the focus chain is empty.
    pub fn focus_previous(&mut self) -> BoxId {
        self.focus.focus_previous(&mut self.boxes)
    }

    pub fn focused(&self) -> Option<BoxId> {
        self.focus.focused()
    }

    pub fn focus_chain(&self) -> &FocusChain {
        &self.focus
    }

    // ── Behaviors ────────────────────────────────────────────────────

    /// Attach a button behavior to `id`.
    pub fn add_button(&mut self, id: BoxId) -> BehaviorId {
        let behavior = self.behaviors.insert(id, BehaviorKind::Button(ButtonBehavior::default()));
        self.boxes[id].behavior = Some(behavior);
        behavior
    }

    /// Attach a numeric text entry editing `value` to `id`. The box shows
    /// the value's text.
    pub fn add_text_entry(&mut self, id: BoxId, value: IntString) -> BehaviorId {
        self.set_text(id, value.text());
        let behavior = self
            .behaviors
            .insert(id, BehaviorKind::TextEntry(TextEntryBehavior::new(value)));
        self.boxes[id].behavior = Some(behavior);
        behavior
    }

    /// Whether the button `id` was activated this frame.
    pub fn button_activated(&self, id: BehaviorId) -> bool {
        match self.behaviors.get(id).map(|b| &b.kind) {
            Some(BehaviorKind::Button(button)) => button.activated(),
            _ => false,
        }
    }

    /// The text entry `id`, if it exists.
    pub fn text_entry(&self, id: BehaviorId) -> Option<&TextEntryBehavior> {
        match self.behaviors.get(id).map(|b| &b.kind) {
            Some(BehaviorKind::TextEntry(entry)) => Some(entry),
            _ => None,
        }
    }

    // ── Frame pipeline ───────────────────────────────────────────────

    /// Feed one input sample: gestures, key bindings, clipboard replies.
    ///
    /// # Panics
    ///
    /// Panics if `frame.elapsed_ms` is not positive.
    pub fn update_input(&mut self, frame: &InputFrame) {
        self.gestures.update(frame);
        self.pointer_down = frame.is_down(MouseButton::Primary);
        self.force_redraw |= frame.force_redraw;
        self.key = frame.key;

        if let Some(key) = frame.key {
            if let Some(action) = self.bindings.resolve(&key).cloned() {
                self.key = None;
                self.run_action(action);
            }
        }

        if let Some(text) = self.clipboard_backend.as_mut().and_then(|b| b.poll_text()) {
            self.clipboard.deliver(text);
        }
    }

    fn run_action(&mut self, action: EngineAction) {
        match action {
            EngineAction::FocusNext | EngineAction::FocusPrevious if self.focus.is_empty() => {
                log::debug!("focus navigation ignored, focus chain is empty");
            }
            EngineAction::FocusNext => {
                self.focus.focus_next(&mut self.boxes);
            }
            EngineAction::FocusPrevious => {
                self.focus.focus_previous(&mut self.boxes);
            }
            EngineAction::Copy => {
                let Some(text) = self.selected_text() else {
                    log::debug!("copy ignored, nothing is selected");
                    return;
                };
                let text = text.to_owned();
                match self.clipboard_backend.as_mut() {
                    Some(backend) => backend.set_text(&text),
                    None => log::debug!("copy ignored, no clipboard backend"),
                }
            }
            EngineAction::Paste => match self.clipboard_backend.as_mut() {
                Some(backend) => backend.request_text(),
                None => log::debug!("paste ignored, no clipboard backend"),
            },
            EngineAction::Custom(name) => self.actions.push(name),
        }
    }

    /// Recompute selectors from the pointer and re-resolve styles. Returns
    /// whether any box was restyled.
    pub fn update_layout(&mut self) -> bool {
        let pointer = PointerState {
            position: self.gestures.pointer(),
            down: self.pointer_down,
            click_origin: self.gestures.click_origin(MouseButton::Primary),
            clicked: self.gestures.clicked(MouseButton::Primary),
        };
        update_selectors(&mut self.boxes, &mut self.focus, &pointer);
        apply_cascade(&mut self.boxes, &self.styles)
    }

    /// Advance every behavior in registration order. Returns whether any
    /// behavior changed something visible.
    pub fn update_behaviors(&mut self) -> bool {
        let clicked = self.gestures.clicked(MouseButton::Primary);
        let double_clicked = self.gestures.double_clicked(MouseButton::Primary);
        let digit = self.key.and_then(|k| k.digit());
        let key = self.key.filter(|k| k.digit().is_none()).map(|k| k.code);
        let mut redraw = false;

        for index in 0..self.behaviors.len() {
            let id = self.behaviors.ids()[index];
            let Some(behavior) = self.behaviors.get_mut(id) else {
                continue;
            };
            let target = behavior.target;
            let lay = &self.boxes[target];
            let hovered = lay.is_set(SelectorFlags::HOVER);

            match &mut behavior.kind {
                BehaviorKind::Button(button) => {
                    button.update(clicked, lay.active);
                }
                BehaviorKind::TextEntry(entry) => {
                    let focused = lay.is_set(SelectorFlags::FOCUS);
                    let input = EntryInput {
                        focus_gained: lay.rising_edge(SelectorFlags::FOCUS),
                        focused,
                        hover_click: clicked && hovered,
                        hover_double_click: double_clicked && hovered,
                        digit: digit.filter(|_| focused),
                        key: key.filter(|_| focused),
                        clipboard_ready: self.clipboard.is_ready()
                            && self.selection.is_some_and(|s| s.dest == target),
                    };

                    let effects = entry.update(&input);
                    for effect in &effects {
                        match effect {
                            EntryEffect::SelectAll => self.selection = Some(Selection::all(target)),
                            EntryEffect::Unselect => {
                                if self.selection.is_some_and(|s| s.dest == target) {
                                    self.selection = None;
                                }
                            }
                            EntryEffect::ConsumeClipboard => {
                                entry.paste(self.clipboard.text());
                                self.clipboard.consume();
                            }
                            EntryEffect::Commit => self.boxes[target].content_changed = true,
                            EntryEffect::ReplaceWithDigit(_)
                            | EntryEffect::AppendDigit(_)
                            | EntryEffect::DeleteDigit
                            | EntryEffect::Restore => {}
                        }
                    }

                    if self.boxes[target].text() != Some(entry.value().text()) {
                        let text = entry.value().text().to_owned();
                        let size = measure_box_text(
                            self.measure.as_ref(),
                            &self.styles,
                            &self.config.default_font,
                            &self.boxes[target],
                            &text,
                        );
                        self.boxes[target].set_text(text, size);
                    }
                    redraw |= !effects.is_empty();
                }
            }
        }
        redraw
    }

    /// Run input, layout and behavior updates for one sample.
    pub fn process_frame(&mut self, frame: &InputFrame) -> FrameReport {
        self.update_input(frame);
        let restyled = self.update_layout();
        let changed = self.update_behaviors();
        FrameReport {
            redraw: std::mem::take(&mut self.force_redraw) || restyled || changed,
            actions: std::mem::take(&mut self.actions),
        }
    }

    /// Clear per-frame flags: changed selectors, content changes, the
    /// unconsumed key.
    pub fn end_frame(&mut self) {
        self.boxes.end_frame();
        self.key = None;
    }

    // ── Clipboard ────────────────────────────────────────────────────

    /// Hand clipboard text to the engine directly, for backends that push
    /// their answer instead of being polled.
    pub fn deliver_clipboard(&mut self, text: impl Into<String>) {
        self.clipboard.deliver(text);
    }

    pub fn clipboard(&self) -> &ClipboardState {
        &self.clipboard
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// The selected part of the selection's box content.
    pub fn selected_text(&self) -> Option<&str> {
        let selection = self.selection.as_ref()?;
        let text = self.boxes.get(selection.dest)?.text()?;
        Some(selection.split(text).1)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn boxes(&self) -> &BoxRegistry {
        &self.boxes
    }

    pub fn gestures(&self) -> &GestureDetector {
        &self.gestures
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindingRegistry {
        &mut self.bindings
    }

    /// Pointer movement since the previous sample.
    pub fn pointer_delta(&self) -> Vec2 {
        self.gestures.pointer_delta()
    }

    /// Wheel movement of the last sample.
    pub fn wheel(&self) -> f64 {
        self.gestures.wheel()
    }

    // ── Painting ─────────────────────────────────────────────────────

    /// Paint every box in creation order.
    pub fn paint(&self, painter: &mut dyn Painter) {
        let ctx = PaintContext {
            default_font: &self.config.default_font,
            selection: self.selection.as_ref(),
            selection_colors: self.styles.selection_colors(),
        };
        for (id, lay) in self.boxes.iter().filter(|(_, lay)| lay.rect.is_placed()) {
            paint_box(painter, id, lay, self.styles.get(lay.current_style), &ctx);
        }
    }
}

/// Size of `text` in `lay`'s current style font.
fn measure_box_text(
    measure: &dyn TextMeasure,
    styles: &StyleTable,
    default_font: &Font,
    lay: &LayoutBox,
    text: &str,
) -> Size {
    let font = LayoutBox::font(styles.get(lay.current_style), default_font);
    measure.measure(text, &font)
}

// ===========================================================================
// Tests
// ===========================================================================
