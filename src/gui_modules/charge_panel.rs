use crate::battery::ChargeLevel;
use crate::gui_modules::{create_panel_style, Message, MUTED_TEXT};
use iced::widget::{column, container, row, slider, text};
use iced::{Alignment, Element, Length};

pub fn charge_panel(charge: ChargeLevel) -> Element<'static, Message> {
    let percent = charge.percent();

    container(
        column![
            row![
                text("CHARGE LEVEL")
                    .size(14)
                    .style(MUTED_TEXT)
                    .width(Length::Fill),
                text(charge.to_string()).size(14).style(MUTED_TEXT),
            ]
            .align_items(Alignment::Center),
            slider(0..=100u8, percent, Message::ChargeChanged).step(1u8),
        ]
        .spacing(16),
    )
    .padding(24)
    .width(Length::Fill)
    .style(create_panel_style())
    .into()
}
