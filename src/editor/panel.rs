/*!
 * Headless subtitle edit panel.
 *
 * The panel mirrors the active line into a view model and turns control
 * input (`EditCommand`) into document mutations. Edits apply to every
 * selected line; each one is recorded as a commit, and repeated text edits
 * are folded into one commit through the `CommitCoalescer`.
 */

use std::time::Instant;

use log::{debug, warn};
use serde::Serialize;

use crate::app_config::EditorConfig;
use crate::ass::{Color, Style};
use crate::document::{CommitFlags, CommitId, Document, Line, LineId, Margin};
use crate::editor::coalesce::CommitCoalescer;
use crate::editor::commands::{EditCommand, TextChange, TimeField, TimeMode};
use crate::editor::override_edit::{ColorSlot, FontSpec, FormatFlag, TagEdit, TaggedText, TextSelection};
use crate::errors::EditError;
use crate::video::{FrameKind, VideoController};

/// Collaborators a command needs
pub struct EditContext<'a> {
    pub document: &'a mut Document,
    pub video: &'a mut dyn VideoController,
}

impl<'a> EditContext<'a> {
    pub fn new(document: &'a mut Document, video: &'a mut dyn VideoController) -> Self {
        Self { document, video }
    }
}

/// Control that has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Focus {
    #[default]
    None,
    Text,
}

/// What the panel's controls currently show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub enabled: bool,
    pub text: String,
    pub selection: TextSelection,
    pub focus: Focus,
    pub start_ms: u64,
    pub end_ms: u64,
    pub duration_ms: u64,
    /// Duration in frames, only in frame mode
    pub duration_frames: Option<i64>,
    pub layer: i32,
    /// Left, right, vertical
    pub margins: [String; 3],
    pub effect: String,
    pub actor: String,
    pub comment: bool,
    pub style: String,
    pub styles: Vec<String>,
    pub actors: Vec<String>,
    pub time_mode: TimeMode,
    pub frame_mode_available: bool,
}

impl Default for PanelView {
    fn default() -> Self {
        Self {
            enabled: true,
            text: String::new(),
            selection: TextSelection::default(),
            focus: Focus::None,
            start_ms: 0,
            end_ms: 0,
            duration_ms: 0,
            duration_frames: None,
            layer: 0,
            margins: Default::default(),
            effect: String::new(),
            actor: String::new(),
            comment: false,
            style: "Default".to_string(),
            styles: vec!["Default".to_string()],
            actors: Vec::new(),
            time_mode: TimeMode::Time,
            frame_mode_available: false,
        }
    }
}

/// Edit panel bound to a document's active line
#[derive(Debug)]
pub struct EditPanel {
    line: Option<LineId>,
    view: PanelView,
    coalescer: CommitCoalescer,
    time_commits: [Option<CommitId>; 3],
    default_duration_ms: u64,
    subtitle_sync: bool,
}

impl EditPanel {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            line: None,
            view: PanelView::default(),
            coalescer: CommitCoalescer::new(config.timing.coalesce_window()),
            time_commits: [None; 3],
            default_duration_ms: config.timing.default_duration_ms,
            subtitle_sync: config.video.subtitle_sync,
        }
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    pub fn active_line(&self) -> Option<LineId> {
        self.line
    }

    pub fn coalescer(&self) -> &CommitCoalescer {
        &self.coalescer
    }

    /// Apply one command
    pub fn dispatch(&mut self, ctx: &mut EditContext<'_>, command: EditCommand, now: Instant) -> Result<(), EditError> {
        match command {
            EditCommand::TextChanged { text, kind } => self.text_changed(ctx.document, text, kind, now),
            EditCommand::SetSelection(selection) => {
                self.view.selection = selection.clamped(self.view.text.chars().count());
                Ok(())
            }
            EditCommand::ToggleFlag(flag) => self.toggle_flag(ctx.document, flag, now),
            EditCommand::SetFont(font) => self.set_font(ctx.document, &font, now),
            EditCommand::SetColor { slot, color } => self.set_color(ctx.document, slot, color, now),
            EditCommand::SetStyle(style) => {
                self.view.style = style.clone();
                self.set_selected_rows(ctx.document, "style change", CommitFlags::DIAG_META, false, now, |l| {
                    l.style = style.clone()
                });
                Ok(())
            }
            EditCommand::SetActor(actor) => {
                self.view.actor = actor.clone();
                self.set_selected_rows(ctx.document, "actor change", CommitFlags::DIAG_META, false, now, |l| {
                    l.actor = actor.clone()
                });
                self.view.actors = ctx.document.actors();
                Ok(())
            }
            EditCommand::SetEffect(effect) => {
                self.view.effect = effect.clone();
                self.set_selected_rows(ctx.document, "effect change", CommitFlags::DIAG_META, false, now, |l| {
                    l.effect = effect.clone()
                });
                Ok(())
            }
            EditCommand::SetLayer(layer) => {
                self.view.layer = layer;
                self.set_selected_rows(ctx.document, "layer change", CommitFlags::DIAG_META, false, now, |l| {
                    l.layer = layer
                });
                Ok(())
            }
            EditCommand::SetMargin { margin, value } => {
                self.set_selected_rows(ctx.document, margin.description(), CommitFlags::DIAG_META, false, now, |l| {
                    l.set_margin_string(margin, &value)
                });
                if let Some(line) = self.line.and_then(|id| ctx.document.line(id)) {
                    self.view.margins[margin_index(margin)] = line.margin_string(margin);
                }
                Ok(())
            }
            EditCommand::SetComment(comment) => {
                self.view.comment = comment;
                self.set_selected_rows(ctx.document, "comment change", CommitFlags::DIAG_META, false, now, |l| {
                    l.comment = comment
                });
                Ok(())
            }
            EditCommand::SetStartTime(ms) => {
                self.view.start_ms = ms;
                if self.view.start_ms > self.view.end_ms {
                    self.view.end_ms = self.view.start_ms;
                }
                self.commit_times(ctx, TimeField::Start);
                Ok(())
            }
            EditCommand::SetEndTime(ms) => {
                self.view.end_ms = ms;
                if self.view.start_ms > self.view.end_ms {
                    self.view.start_ms = self.view.end_ms;
                }
                self.commit_times(ctx, TimeField::End);
                Ok(())
            }
            EditCommand::SetDuration(ms) => {
                self.view.end_ms = self.view.start_ms.saturating_add(ms);
                self.commit_times(ctx, TimeField::Duration);
                Ok(())
            }
            EditCommand::SetDurationFrames(frames) => {
                if self.view.time_mode != TimeMode::Frame {
                    warn!("Ignoring frame duration while not in frame mode");
                    return Ok(());
                }
                self.view.end_ms = end_after_frames(&*ctx.video, self.view.start_ms, frames);
                self.view.duration_frames = Some(frames);
                self.commit_times(ctx, TimeField::Duration);
                Ok(())
            }
            EditCommand::SetTimeMode(mode) => {
                self.set_time_mode(&*ctx.video, mode);
                Ok(())
            }
            EditCommand::CommitLine => self.next_line(ctx),
        }
    }

    /// The document's active line changed
    pub fn on_active_line_changed(&mut self, ctx: &mut EditContext<'_>) {
        self.line = ctx.document.active_line();
        self.coalescer.reset();
        self.on_timecodes_changed(ctx.video.timecodes_loaded());
        self.update(ctx.document, &*ctx.video, CommitFlags::DIAG_FULL);

        if ctx.video.is_loaded() && self.subtitle_sync {
            if let Some(line) = self.line.and_then(|id| ctx.document.line(id)) {
                ctx.video.stop();
                ctx.video.jump_to_time(line.start_ms);
            }
        }
    }

    /// Another component committed a change to the document
    pub fn on_document_changed(&mut self, document: &Document, video: &dyn VideoController, flags: CommitFlags) {
        self.update(document, video, flags);
    }

    /// Timecodes were loaded or unloaded
    pub fn on_timecodes_changed(&mut self, loaded: bool) {
        self.view.frame_mode_available = loaded;
        if !loaded {
            self.view.time_mode = TimeMode::Time;
            self.view.duration_frames = None;
        }
    }

    /// The grouping window ran out; the next edit starts a new commit
    pub fn on_coalesce_timeout(&mut self) {
        self.coalescer.reset();
    }

    fn update(&mut self, document: &Document, video: &dyn VideoController, flags: CommitFlags) {
        if flags.intersects(CommitFlags::NEW | CommitFlags::STYLES) {
            self.view.styles = document.style_names();
        }
        if flags.contains(CommitFlags::NEW) {
            self.view.actors = document.actors();
            self.view.selection = TextSelection::caret(0);
            return;
        }
        if flags == CommitFlags::ORDER {
            return;
        }

        let line = self.line.and_then(|id| document.line(id));
        self.set_controls_state(line.is_some());
        let Some(line) = line else {
            return;
        };

        if flags.contains(CommitFlags::STYLES) {
            self.view.style = line.style.clone();
        }
        if flags.contains(CommitFlags::DIAG_TIME) {
            self.view.start_ms = line.start_ms;
            self.view.end_ms = line.end_ms;
            self.view.duration_ms = line.duration_ms();
            self.refresh_duration_frames(video);
        }
        if flags.contains(CommitFlags::DIAG_TEXT) {
            self.view.text = line.text.clone();
            self.view.selection = self.view.selection.clamped(line.text.chars().count());
        }
        if flags.contains(CommitFlags::DIAG_META) {
            self.view.layer = line.layer;
            self.view.margins = [
                line.margin_string(Margin::Left),
                line.margin_string(Margin::Right),
                line.margin_string(Margin::Vertical),
            ];
            self.view.effect = line.effect.clone();
            self.view.comment = line.comment;
            self.view.style = line.style.clone();
            self.view.actors = document.actors();
            self.view.actor = line.actor.clone();
        }
    }

    fn set_controls_state(&mut self, enabled: bool) {
        if enabled == self.view.enabled {
            return;
        }
        self.view.enabled = enabled;

        if !enabled {
            self.view.text.clear();
            self.view.selection = TextSelection::default();
            self.view.start_ms = 0;
            self.view.end_ms = 0;
            self.view.duration_ms = 0;
            self.view.duration_frames = None;
            self.view.layer = 0;
            self.view.margins = Default::default();
            self.view.effect.clear();
            self.view.comment = false;
        }
    }

    fn set_time_mode(&mut self, video: &dyn VideoController, mode: TimeMode) {
        if mode == TimeMode::Frame && !self.view.frame_mode_available {
            warn!("Frame mode requested without timecodes");
            return;
        }
        self.view.time_mode = mode;
        self.refresh_duration_frames(video);
    }

    fn refresh_duration_frames(&mut self, video: &dyn VideoController) {
        self.view.duration_frames = match self.view.time_mode {
            TimeMode::Frame => Some(frame_span(video, self.view.start_ms, self.view.end_ms)),
            TimeMode::Time => None,
        };
    }

    /// Apply a change to every selected line and record it
    fn set_selected_rows(
        &mut self,
        document: &mut Document,
        description: &str,
        flags: CommitFlags,
        amend: bool,
        now: Instant,
        apply: impl FnMut(&mut Line),
    ) -> CommitId {
        document.for_each_selected(apply);

        let amend_id = self.coalescer.amend_target(description, amend, now);
        let id = document.commit(description, flags, amend_id, single_selected(document));
        self.coalescer.record(description, id, now);
        id
    }

    fn commit_text(&mut self, document: &mut Document, description: &str, now: Instant) {
        let text = self.view.text.clone();
        self.set_selected_rows(document, description, CommitFlags::DIAG_TEXT, true, now, |l| {
            l.text = text.clone()
        });
    }

    fn text_changed(&mut self, document: &mut Document, text: String, kind: TextChange, now: Instant) -> Result<(), EditError> {
        let len = text.chars().count();
        self.view.text = text;
        self.view.selection = self.view.selection.clamped(len);

        let differs = self
            .line
            .and_then(|id| document.line(id))
            .is_some_and(|line| line.text != self.view.text);
        if differs {
            self.commit_text(document, kind.description(), now);
        }
        Ok(())
    }

    fn commit_times(&mut self, ctx: &mut EditContext<'_>, field: TimeField) {
        let video = &*ctx.video;
        let view = &mut self.view;
        match view.time_mode {
            TimeMode::Frame => {
                view.duration_frames = Some(frame_span(video, view.start_ms, view.end_ms));
            }
            TimeMode::Time => {}
        }
        view.duration_ms = view.end_ms.saturating_sub(view.start_ms);

        let (start_ms, end_ms, duration_ms) = (view.start_ms, view.end_ms, view.duration_ms);
        let duration_frames = view.duration_frames.filter(|_| view.time_mode == TimeMode::Frame);

        ctx.document.for_each_selected(|line| match field {
            TimeField::Start => {
                line.start_ms = start_ms;
                if line.start_ms > line.end_ms {
                    line.end_ms = line.start_ms;
                }
            }
            TimeField::End => {
                line.end_ms = end_ms;
                if line.start_ms > line.end_ms {
                    line.start_ms = line.end_ms;
                }
            }
            TimeField::Duration => {
                line.end_ms = match duration_frames {
                    Some(frames) => end_after_frames(video, line.start_ms, frames),
                    None => line.start_ms.saturating_add(duration_ms),
                };
            }
        });

        let slot = &mut self.time_commits[field.index()];
        let single = single_selected(ctx.document);
        *slot = Some(ctx.document.commit("modify times", CommitFlags::DIAG_TIME, *slot, single));
    }

    /// Text and style of the active line, for tag edits
    fn tag_target(&self, document: &Document) -> Result<(TaggedText, Style), EditError> {
        let id = self.line.ok_or(EditError::NoActiveLine)?;
        let line = document.line(id).ok_or(EditError::UnknownLine(id))?;
        let style = match document.style(&line.style) {
            Some(style) => style.clone(),
            None => {
                warn!("Style '{}' not found, using defaults", line.style);
                Style::default()
            }
        };
        Ok((TaggedText::new(&line.text), style))
    }

    /// Show the edited text, then commit it to the selection
    fn finish_tag_edit(
        &mut self,
        document: &mut Document,
        tagged: TaggedText,
        edit: Option<TagEdit>,
        description: &str,
        now: Instant,
    ) {
        self.view.focus = Focus::Text;
        let Some(edit) = edit else {
            return;
        };

        self.view.text = tagged.into_text();
        self.view.selection = edit.selection;
        if let Some(line) = self.line.and_then(|id| document.line_mut(id)) {
            line.text = self.view.text.clone();
        }
        self.coalescer.reset();
        self.commit_text(document, description, now);
        debug!("{}: '{}'", description, self.view.text);
    }

    fn toggle_flag(&mut self, document: &mut Document, flag: FormatFlag, now: Instant) -> Result<(), EditError> {
        let (mut tagged, style) = self.tag_target(document)?;
        let edit = tagged.toggle_flag(flag, &style, self.view.selection);
        self.finish_tag_edit(document, tagged, Some(edit), flag.description(), now);
        Ok(())
    }

    fn set_font(&mut self, document: &mut Document, font: &FontSpec, now: Instant) -> Result<(), EditError> {
        let (mut tagged, style) = self.tag_target(document)?;
        let edit = tagged.apply_font(font, &style, self.view.selection);
        self.finish_tag_edit(document, tagged, edit, "set font", now);
        Ok(())
    }

    fn set_color(&mut self, document: &mut Document, slot: ColorSlot, color: Color, now: Instant) -> Result<(), EditError> {
        let (mut tagged, style) = self.tag_target(document)?;
        let edit = tagged.apply_color(slot, color, &style, self.view.selection);
        self.finish_tag_edit(document, tagged, edit, "set color", now);
        Ok(())
    }

    fn next_line(&mut self, ctx: &mut EditContext<'_>) -> Result<(), EditError> {
        let Some(current_id) = self.line else {
            return Ok(());
        };
        let current = ctx
            .document
            .line(current_id)
            .cloned()
            .ok_or(EditError::UnknownLine(current_id))?;

        if !ctx.document.next_line() {
            let mut new_line = Line::new(current.end_ms, current.end_ms.saturating_add(self.default_duration_ms), "");
            new_line.style = current.style.clone();
            ctx.document.insert_after(current_id, new_line)?;
            ctx.document.commit("line insertion", CommitFlags::DIAG_ADDREM, None, None);
            ctx.document.next_line();
        }

        self.on_active_line_changed(ctx);
        Ok(())
    }
}

/// Number of frames shown between two times, both ends included
fn frame_span(video: &dyn VideoController, start_ms: u64, end_ms: u64) -> i64 {
    video
        .frame_at_time(end_ms, FrameKind::End)
        .saturating_sub(video.frame_at_time(start_ms, FrameKind::Start))
        .saturating_add(1)
}

/// End time of a line starting at `start_ms` that shows `frames` frames
fn end_after_frames(video: &dyn VideoController, start_ms: u64, frames: i64) -> u64 {
    let start_frame = video.frame_at_time(start_ms, FrameKind::Start);
    video.time_at_frame(start_frame.saturating_add(frames).saturating_sub(1), FrameKind::End)
}

fn single_selected(document: &Document) -> Option<LineId> {
    let selection = document.selection();
    if selection.len() == 1 {
        selection.iter().next().copied()
    } else {
        None
    }
}

fn margin_index(margin: Margin) -> usize {
    match margin {
        Margin::Left => 0,
        Margin::Right => 1,
        Margin::Vertical => 2,
    }
}
