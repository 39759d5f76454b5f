//! Debug helpers: on-screen сообщения + debug линия прицеливания
//!
//! `screen_log` - fire-and-forget. Сообщение уходит в process-wide
//! `OverlayPrinter` (client рисует его поверх экрана на 1 секунду).
//! Нет printer → сообщение молча теряется (headless режим).

use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::sync::Mutex;

/// Сколько секунд сообщение висит на экране
pub const SCREEN_MESSAGE_DURATION: f32 = 1.0;

/// Цвет всех debug сообщений
pub const SCREEN_MESSAGE_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

/// Длина debug линии прицеливания (world units)
pub const AIM_DEBUG_LINE_LENGTH: f32 = 150.0;

static OVERLAY: Lazy<Mutex<Option<Box<dyn OverlayPrinter>>>> = Lazy::new(|| Mutex::new(None));

/// Одно transient сообщение для overlay
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenMessage {
    pub text: String,
    pub duration: f32,
    pub color: Color,
}

/// Приёмник on-screen сообщений (реализует host: client overlay, тесты)
pub trait OverlayPrinter: Send + Sync {
    fn display(&self, message: ScreenMessage);
}

pub fn set_overlay_printer(printer: Box<dyn OverlayPrinter>) {
    if let Ok(mut slot) = OVERLAY.lock() {
        *slot = Some(printer);
    }
}

/// Значение которое умеет превращаться в текст для overlay
pub trait ScreenLogValue {
    fn to_screen_text(&self) -> String;
}

impl ScreenLogValue for &str {
    fn to_screen_text(&self) -> String {
        (*self).to_string()
    }
}

impl ScreenLogValue for String {
    fn to_screen_text(&self) -> String {
        self.clone()
    }
}

impl ScreenLogValue for f32 {
    fn to_screen_text(&self) -> String {
        format!("{:.6}", self)
    }
}

impl ScreenLogValue for f64 {
    fn to_screen_text(&self) -> String {
        format!("{:.6}", self)
    }
}

impl ScreenLogValue for i32 {
    fn to_screen_text(&self) -> String {
        format!("{}", self)
    }
}

pub fn screen_log<T: ScreenLogValue>(value: T) {
    let message = ScreenMessage {
        text: value.to_screen_text(),
        duration: SCREEN_MESSAGE_DURATION,
        color: SCREEN_MESSAGE_COLOR,
    };

    if let Ok(slot) = OVERLAY.lock() {
        if let Some(printer) = slot.as_ref() {
            printer.display(message);
        }
    }
}

/// Откуда пришёл aim (определяет цвет debug линии)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimSource {
    /// Aim из movement input (gamepad без правого стика)
    Move,
    /// Aim из правого стика
    Stick,
}

impl AimSource {
    pub fn color(&self) -> Color {
        match self {
            AimSource::Move => Color::srgb(1.0, 0.0, 0.0),
            AimSource::Stick => Color::srgb(0.0, 0.0, 1.0),
        }
    }
}

/// Event: нарисовать линию прицеливания на один frame (client → Gizmos)
#[derive(Event, Debug, Clone)]
pub struct AimDebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub source: AimSource,
}

/// Единственная точка где решается рисовать ли debug линию
///
/// `axis` в координатах input'а; линия идёт вдоль (-axis.x, axis.y) на земле.
pub fn emit_aim_debug_line(
    enabled: bool,
    lines: &mut EventWriter<AimDebugLine>,
    origin: Vec3,
    axis: Vec2,
    source: AimSource,
) {
    if !enabled {
        return;
    }

    let direction = crate::movement::ground_to_world(Vec2::new(-axis.x, axis.y));
    lines.write(AimDebugLine {
        start: origin,
        end: origin + direction * AIM_DEBUG_LINE_LENGTH,
        source,
    });
}
