//! Small modal prompts: the zoom factor asked for after a selection and the
//! pen color picker of zoom windows.

use crate::annotate::{ZoomFactor, MAX_ZOOM_FACTOR, MIN_ZOOM_FACTOR};
use crate::view::SelectionRect;
use eframe::egui::{self, color_picker, Color32};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromptResult<T> {
    Pending,
    Accepted(T),
    Cancelled,
}

fn prompt_window(title: &str, id: egui::Id) -> egui::Window<'_> {
    egui::Window::new(title)
        .id(id)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

/// Asks for the magnification of a freshly selected region.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomPrompt {
    region: SelectionRect,
    value: f64,
}

impl ZoomPrompt {
    pub fn new(region: SelectionRect, initial: ZoomFactor) -> Self {
        Self {
            region,
            value: initial.get(),
        }
    }

    pub fn region(&self) -> SelectionRect {
        self.region
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// The value currently entered, forced into range.
    pub fn factor(&self) -> ZoomFactor {
        ZoomFactor::clamped(self.value)
    }

    pub fn ui(&mut self, ctx: &egui::Context, id: egui::Id) -> PromptResult<ZoomFactor> {
        let mut result = PromptResult::Pending;
        prompt_window("Zoom factor", id).show(ctx, |ui| {
            ui.label(format!("Region {}", self.region));
            ui.horizontal(|ui| {
                ui.label("Zoom factor:");
                ui.add(
                    egui::DragValue::new(&mut self.value)
                        .clamp_range(MIN_ZOOM_FACTOR..=MAX_ZOOM_FACTOR)
                        .speed(0.1)
                        .fixed_decimals(1)
                        .suffix("x"),
                );
            });
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    result = PromptResult::Accepted(self.factor());
                }
                if ui.button("Cancel").clicked() {
                    result = PromptResult::Cancelled;
                }
            });
        });
        if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            result = PromptResult::Accepted(self.factor());
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            result = PromptResult::Cancelled;
        }
        result
    }
}

/// Color picker with explicit confirmation. Cancelling keeps the old color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPrompt {
    color: Color32,
}

impl ColorPrompt {
    pub fn new(current: Color32) -> Self {
        Self { color: current }
    }

    pub fn ui(&mut self, ctx: &egui::Context, id: egui::Id) -> PromptResult<Color32> {
        let mut result = PromptResult::Pending;
        prompt_window("Pen color", id).show(ctx, |ui| {
            color_picker::color_picker_color32(ui, &mut self.color, color_picker::Alpha::Opaque);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    result = PromptResult::Accepted(self.color);
                }
                if ui.button("Cancel").clicked() {
                    result = PromptResult::Cancelled;
                }
            });
        });
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            result = PromptResult::Cancelled;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entered_value_is_kept_in_range() {
        let rect = SelectionRect {
            x: 0,
            y: 0,
            width: 20,
            height: 20,
        };
        let mut prompt = ZoomPrompt::new(rect, ZoomFactor::default());
        assert_eq!(prompt.factor().get(), 2.0);
        prompt.set_value(12.0);
        assert_eq!(prompt.factor().get(), 10.0);
        prompt.set_value(4.26);
        assert_eq!(prompt.factor().get(), 4.3);
        assert_eq!(prompt.region(), rect);
    }

    #[test]
    fn prompt_stays_pending_without_input() {
        let ctx = egui::Context::default();
        let mut prompt = ColorPrompt::new(Color32::RED);
        let mut result = PromptResult::Accepted(Color32::BLACK);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            result = prompt.ui(ctx, egui::Id::new("color"));
        });
        assert_eq!(result, PromptResult::Pending);
    }

    fn key_press(key: egui::Key) -> egui::RawInput {
        egui::RawInput {
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn zoom_prompt_answers_keyboard() {
        let rect = SelectionRect {
            x: 4,
            y: 4,
            width: 30,
            height: 30,
        };
        let ctx = egui::Context::default();
        let mut prompt = ZoomPrompt::new(rect, ZoomFactor::default());
        let id = egui::Id::new("zoom");

        let mut result = PromptResult::Cancelled;
        let _ = ctx.run(egui::RawInput::default(), |ctx| result = prompt.ui(ctx, id));
        assert_eq!(result, PromptResult::Pending);

        prompt.set_value(3.0);
        let _ = ctx.run(key_press(egui::Key::Enter), |ctx| result = prompt.ui(ctx, id));
        assert_eq!(result, PromptResult::Accepted(ZoomFactor::new(3.0).unwrap()));

        let _ = ctx.run(key_press(egui::Key::Escape), |ctx| result = prompt.ui(ctx, id));
        assert_eq!(result, PromptResult::Cancelled);
    }
}
