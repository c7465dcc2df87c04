//! Application - Terminal Front-End
//!
//! Reads one command per line, applies it to the session and prints the
//! resulting views and notices.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use crossbeam_channel::Receiver;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::app::commands::{Command, HELP, parse_command};
use crate::app::render::{
    render_categories, render_dashboard, render_gauge, render_history, render_items,
    render_notice, render_result,
};
use crate::domain::config::{DeviceConfig, FeedMode, Settings};
use crate::domain::factors::EmissionFactorTable;
use crate::domain::month::current_month_label;
use crate::error::{Error, Result};
use crate::services::store::{HistoryStore, open_history_store};
use crate::services::{
    ConnectionState, DeviceEvent, DeviceTicker, SimulatedSensor, runtime_handle,
};
use crate::state::device_state::DeviceState;
use crate::state::notice_state::NoticeLevel;
use crate::state::session_state::SessionState;

/// The sensor, driven the way the configuration asks
enum DeviceFeed {
    Ticker {
        ticker: DeviceTicker,
        events: Receiver<DeviceEvent>,
    },
    Pull(SimulatedSensor),
}

impl DeviceFeed {
    fn open(config: &DeviceConfig, handle: &Handle) -> Result<Self> {
        match config.mode {
            FeedMode::Ticker => {
                let (tx, events) = crossbeam_channel::unbounded();
                let ticker = DeviceTicker::start(handle, config.clone(), tx)?;
                Ok(DeviceFeed::Ticker { ticker, events })
            }
            FeedMode::Pull => Ok(DeviceFeed::Pull(SimulatedSensor::new(config.clone())?)),
        }
    }

    /// Bring `device` up to date with the feed
    fn refresh(&mut self, device: &mut DeviceState) {
        match self {
            DeviceFeed::Ticker { events, .. } => {
                device.drain(events);
            }
            DeviceFeed::Pull(sensor) => {
                if let Some(reading) = sensor.poll(Instant::now()) {
                    device.record(reading);
                }
                device.set_connection(sensor.state());
            }
        }
    }

    fn connect(&mut self) {
        match self {
            DeviceFeed::Ticker { ticker, .. } => ticker.connect(),
            DeviceFeed::Pull(sensor) => sensor.connect(Instant::now()),
        }
    }

    fn disconnect(&mut self) {
        match self {
            DeviceFeed::Ticker { ticker, .. } => ticker.disconnect(),
            DeviceFeed::Pull(sensor) => sensor.disconnect(),
        }
    }

    fn state(&self) -> ConnectionState {
        match self {
            DeviceFeed::Ticker { ticker, .. } => ticker.state(),
            DeviceFeed::Pull(sensor) => sensor.state(),
        }
    }
}

/// Everything one terminal session owns
pub struct Application {
    settings: Settings,
    store: Box<dyn HistoryStore>,
    session: SessionState,
    device: DeviceState,
    feed: DeviceFeed,
    seen_notice: u64,
}

impl Application {
    pub fn new(settings: Settings, store: Box<dyn HistoryStore>, handle: &Handle) -> Result<Self> {
        let feed = DeviceFeed::open(&settings.device, handle)?;
        let device = DeviceState::new(settings.device.readings_capacity);
        Ok(Self {
            settings,
            store,
            session: SessionState::new(),
            device,
            feed,
            seen_notice: 0,
        })
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn device(&self) -> &DeviceState {
        &self.device
    }

    /// Handle one input line; `None` once the user asked to quit
    pub fn handle_line(&mut self, line: &str) -> Option<Vec<String>> {
        self.feed.refresh(&mut self.device);

        let view = match parse_command(line) {
            Ok(None) => None,
            Ok(Some(Command::Quit)) => return None,
            Ok(Some(command)) => self.execute(command),
            Err(e) => {
                let message = match e {
                    Error::Invalid { message } => message,
                    other => other.to_string(),
                };
                self.session.notices_mut().push_now(NoticeLevel::Warn, message);
                None
            }
        };

        let mut output: Vec<String> = self
            .session
            .notices()
            .after(self.seen_notice)
            .map(render_notice)
            .collect();
        self.seen_notice = self.session.notices().last_id();
        output.extend(view);
        Some(output)
    }

    fn execute(&mut self, command: Command) -> Option<String> {
        debug!(?command, "Executing command");
        match command {
            Command::Add { category, quantity } => {
                self.session.add_entry(category, quantity);
                None
            }
            Command::Remove { index } => {
                self.session.remove_entry(index);
                None
            }
            Command::Items => Some(render_items(&self.session.item_rows())),
            Command::Calculate => {
                let month = current_month_label();
                self.session
                    .calculate_and_save(&mut *self.store, &month)
                    .map(render_result)
            }
            Command::ClearItems => {
                self.session.clear_entries();
                None
            }
            Command::Dashboard => Some(render_dashboard(&self.store.get_all())),
            Command::History => Some(render_history(&self.store.get_all())),
            Command::ClearHistory { confirmed } => {
                self.session.clear_history(&mut *self.store, confirmed);
                None
            }
            Command::Categories => Some(render_categories(EmissionFactorTable::standard())),
            Command::Connect => {
                self.feed.connect();
                self.device.set_connection(self.feed.state());
                Some(render_gauge(&self.device, &self.settings.device))
            }
            Command::Disconnect => {
                self.feed.disconnect();
                self.device.set_connection(self.feed.state());
                Some(render_gauge(&self.device, &self.settings.device))
            }
            Command::Device => Some(render_gauge(&self.device, &self.settings.device)),
            Command::Help => Some(HELP.to_string()),
            Command::Quit => None,
        }
    }

    pub fn shutdown(&mut self) {
        self.feed.disconnect();
        self.feed.refresh(&mut self.device);
    }
}

/// Run the interactive loop over stdin/stdout until `quit` or end of input
pub fn run_app(settings: Settings) -> Result<()> {
    let store = open_history_store(&settings.storage)?;
    let handle = runtime_handle()?;
    let mut app = Application::new(settings, store, &handle)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "Carbon Wise - household waste CO2 calculator")?;
    writeln!(stdout, "Type `help` for commands.")?;

    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match app.handle_line(&line) {
            Some(output) => {
                for block in output {
                    writeln!(stdout, "{block}")?;
                }
            }
            None => break,
        }
    }

    app.shutdown();
    info!("Carbon Wise stopped");
    Ok(())
}
