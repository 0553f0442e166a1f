use crate::battery::BatteryMetrics;
use crate::gui_modules::{create_panel_style, Message, MUTED_TEXT};
use iced::widget::{column, container, row, text};
use iced::{Alignment, Element, Length};

fn metric(label: &'static str, value: String) -> Element<'static, Message> {
    column![
        text(label).size(13).style(MUTED_TEXT),
        text(value).size(24),
    ]
    .spacing(4)
    .width(Length::FillPortion(1))
    .align_items(Alignment::Start)
    .into()
}

// Readouts laid out as a 2x2 grid
pub fn battery_box(metrics: &BatteryMetrics) -> Element<'static, Message> {
    container(
        column![
            row![
                metric("Voltage", metrics.voltage_label()),
                metric("Temperature", metrics.temperature_label()),
            ]
            .spacing(16),
            row![
                metric("Estimated Runtime", metrics.runtime_label()),
                metric("Health", metrics.health_label()),
            ]
            .spacing(16),
        ]
        .spacing(16),
    )
    .padding(24)
    .width(Length::Fill)
    .style(create_panel_style())
    .into()
}
