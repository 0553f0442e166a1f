use crate::gui_modules::Message;
use iced::widget::{column, container, scrollable, text};
use iced::{Element, Length};

pub fn fullscreen_button(is_fullscreen: bool) -> Element<'static, Message> {
    container(
        iced::widget::button(text(if is_fullscreen {
            "Exit Fullscreen"
        } else {
            "Fullscreen"
        }))
        .on_press(Message::ToggleFullscreen),
    )
    .width(Length::Fill)
    .align_x(iced::alignment::Horizontal::Right)
    .into()
}

// Combine all parts into the main layout
pub fn main_layout<'a>(
    is_fullscreen: bool,
    header_element: Element<'a, Message>,
    scene_element: Element<'a, Message>,
    charge_element: Element<'a, Message>,
    metrics_element: Element<'a, Message>,
) -> Element<'a, Message> {
    let content = column![
        // Top row for fullscreen button
        fullscreen_button(is_fullscreen),
        header_element,
        // 3D view, then the controls underneath it
        scene_element,
        charge_element,
        metrics_element
    ]
    .padding(32)
    .spacing(24)
    .max_width(1024);

    scrollable(container(content).width(Length::Fill).center_x())
        .height(Length::Fill)
        .into()
}
