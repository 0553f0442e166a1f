use crate::battery::{BatteryMetrics, ChargeLevel};
use crate::scene::compose_scene;
use chrono::Local;
use iced::keyboard::{self, key, Key, Modifiers};
use iced::widget::canvas;
use iced::{time, window, Application, Command, Element, Subscription, Theme};
use log::{debug, info};

use crate::gui_modules::*;

const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Startup options handed over from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flags {
    pub initial_charge: ChargeLevel,
    pub fullscreen: bool,
}

pub struct BatteryMonitor {
    charge: ChargeLevel,
    fullscreen: bool,
    clock: String,
    scene_cache: canvas::Cache,
}

impl BatteryMonitor {
    fn with_flags(flags: Flags) -> Self {
        Self {
            charge: flags.initial_charge,
            fullscreen: flags.fullscreen,
            clock: Local::now().format(CLOCK_FORMAT).to_string(),
            scene_cache: canvas::Cache::new(),
        }
    }

    pub fn charge(&self) -> ChargeLevel {
        self.charge
    }

    pub fn metrics(&self) -> BatteryMetrics {
        BatteryMetrics::from_charge(self.charge)
    }

    /// Stores a new charge level and invalidates the scene. Returns whether it changed.
    fn set_charge(&mut self, charge: ChargeLevel) -> bool {
        if charge == self.charge {
            return false;
        }
        debug!("charge {} -> {}", self.charge, charge);
        self.charge = charge;
        self.scene_cache.clear();
        true
    }

    fn step_charge(&mut self, delta: i8) -> bool {
        let percent = (i16::from(self.charge.percent()) + i16::from(delta)).clamp(0, 100);
        self.set_charge(ChargeLevel::from_percent(percent as u8))
    }

    fn fullscreen_command(&self) -> Command<Message> {
        window::change_mode(
            window::Id::MAIN,
            if self.fullscreen {
                window::Mode::Fullscreen
            } else {
                window::Mode::Windowed
            },
        )
    }
}

// Arrow keys and Home/End behave like a focused range input.
fn key_to_message(key: Key, _modifiers: Modifiers) -> Option<Message> {
    match key {
        Key::Named(key::Named::ArrowLeft) | Key::Named(key::Named::ArrowDown) => {
            Some(Message::StepCharge(-1))
        }
        Key::Named(key::Named::ArrowRight) | Key::Named(key::Named::ArrowUp) => {
            Some(Message::StepCharge(1))
        }
        Key::Named(key::Named::Home) => Some(Message::ChargeChanged(0)),
        Key::Named(key::Named::End) => Some(Message::ChargeChanged(100)),
        _ => None,
    }
}

impl Application for BatteryMonitor {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = iced::Theme;
    type Flags = Flags;

    fn theme(&self) -> Self::Theme {
        Theme::Dark
    }

    fn new(flags: Flags) -> (Self, Command<Message>) {
        let monitor = Self::with_flags(flags);
        info!(
            "battery monitor started at {} charge (fullscreen: {})",
            monitor.charge, monitor.fullscreen
        );
        let command = if monitor.fullscreen {
            monitor.fullscreen_command()
        } else {
            Command::none()
        };
        (monitor, command)
    }

    fn title(&self) -> String {
        format!("{} - {}", TITLE, self.charge())
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::ChargeChanged(percent) => {
                self.set_charge(ChargeLevel::from_percent(percent));
            }

            Message::StepCharge(delta) => {
                self.step_charge(delta);
            }

            Message::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                info!("fullscreen: {}", self.fullscreen);
                return self.fullscreen_command();
            }

            Message::Tick => {
                self.clock = Local::now().format(CLOCK_FORMAT).to_string();
            }
        }
        Command::none()
    }

    fn view(&self) -> Element<Message> {
        let scene = compose_scene(self.charge);
        let metrics = self.metrics();

        main_layout(
            self.fullscreen,
            header(&self.clock),
            battery_canvas(scene, &self.scene_cache),
            charge_panel(self.charge),
            battery_box(&metrics),
        )
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch(vec![
            time::every(std::time::Duration::from_secs(1)).map(|_| Message::Tick),
            keyboard::on_key_press(key_to_message),
        ])
    }
}
