use iced::{widget::container::StyleSheet, Color, Theme};

// Message enum shared between all components
#[derive(Debug, Clone)]
pub enum Message {
    /// Slider position in percent.
    ChargeChanged(u8),
    /// Keyboard nudge in percent points.
    StepCharge(i8),
    ToggleFullscreen,
    Tick, // For updating the clock in the header
}

pub const PANEL_BACKGROUND: Color = Color {
    r: 0.09,
    g: 0.09,
    b: 0.11,
    a: 0.8,
};
pub const MUTED_TEXT: Color = Color {
    r: 0.63,
    g: 0.63,
    b: 0.67,
    a: 1.0,
};

// Card behind the slider and the readouts
pub fn create_panel_style() -> iced::theme::Container {
    iced::theme::Container::Custom(Box::new(move |theme: &Theme| {
        let mut appearance = theme.appearance(&iced::theme::Container::Box);
        appearance.background = Some(PANEL_BACKGROUND.into());
        appearance.border.radius = 16.0.into();
        appearance
    }))
}

pub fn create_badge_style() -> iced::theme::Container {
    iced::theme::Container::Custom(Box::new(move |theme: &Theme| {
        let mut appearance = theme.appearance(&iced::theme::Container::Box);
        appearance.background = Some(Color::from_rgb(0.15, 0.15, 0.17).into());
        appearance.text_color = Some(MUTED_TEXT);
        appearance.border.color = Color::from_rgba(1.0, 1.0, 1.0, 0.4);
        appearance.border.width = 1.0;
        appearance.border.radius = 999.0.into();
        appearance
    }))
}

// Frame around the 3D canvas, same tone as the scene background
pub fn create_scene_style(background: Color) -> iced::theme::Container {
    iced::theme::Container::Custom(Box::new(move |theme: &Theme| {
        let mut appearance = theme.appearance(&iced::theme::Container::Box);
        appearance.background = Some(background.into());
        appearance.border.radius = 24.0.into();
        appearance
    }))
}
