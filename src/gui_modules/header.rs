use crate::gui_modules::{create_badge_style, Message, MUTED_TEXT};
use iced::widget::{column, container, row, text};
use iced::{Alignment, Element, Length};

pub const TITLE: &str = "Solid State Battery Monitor";

const DESCRIPTION: &str = "Visualize a high fidelity 3D lithium cell with real-time telemetry. \
Tune the charge slider to simulate performance under different load scenarios.";

pub fn live_badge(current_time: &str) -> Element<'static, Message> {
    container(
        column![
            text("LIVE MODE").size(14),
            text(current_time.to_owned())
                .size(12)
                .horizontal_alignment(iced::alignment::Horizontal::Center)
        ]
        .spacing(2)
        .align_items(Alignment::Center),
    )
    .padding([8, 20])
    .style(create_badge_style())
    .into()
}

pub fn header(current_time: &str) -> Element<'static, Message> {
    row![
        column![
            text(TITLE).size(40),
            text(DESCRIPTION).size(16).style(MUTED_TEXT),
        ]
        .spacing(12)
        .width(Length::Fill),
        live_badge(current_time)
    ]
    .spacing(16)
    .align_items(Alignment::End)
    .width(Length::Fill)
    .into()
}
