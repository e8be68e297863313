//! Dashboard controller
//!
//! Owns the selection state and the fetched view-models, and multiplexes
//! terminal input, the fixed-interval refresh timer and refresh-task
//! completions on one event loop. Read failures keep the last painted
//! state; write failures surface a blocking alert.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use futures::StreamExt;
use profit_client::{ClientError, ExportFormat, Grouping, HttpClient, NewRecord, RecordType};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::config::DashConfig;
use crate::i18n::{self, Lang, Strings};
use crate::range::QuickFilter;
use crate::refresh::{self, Outcome, RecordsFetch};
use crate::selection::Selection;
use crate::view::{self, CardSet, TableView};

/// Everything the event loop can wake up on besides terminal input
#[derive(Debug)]
pub enum AppEvent {
    Refresh(Outcome),
    Submitted(Result<(), ClientError>),
    PlanChanged(Result<(), ClientError>),
    Exported(Result<PathBuf, String>),
}

/// Input mode of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Manual range entry: start / end / grouping
    Range,
    /// New record entry: date / type / amount
    Record,
    /// Plan name entry
    Plan,
}

/// Manual range form fields
pub struct RangeForm {
    pub start: Input,
    pub end: Input,
    pub group: Grouping,
    pub focus: usize,
}

/// Record entry form fields
pub struct RecordForm {
    pub date: Input,
    pub record_type: RecordType,
    pub amount: Input,
    pub focus: usize,
}

/// Client-side validation failures for record entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordValidation {
    DateRequired,
    AmountInvalid,
}

/// Validate record input before any network call: the date must be
/// non-empty and the amount must parse as a finite number.
pub fn validate_record(date: &str, amount: &str) -> Result<(String, f64), RecordValidation> {
    let date = date.trim();
    if date.is_empty() {
        return Err(RecordValidation::DateRequired);
    }
    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| RecordValidation::AmountInvalid)?;
    if !amount.is_finite() {
        return Err(RecordValidation::AmountInvalid);
    }
    Ok((date.to_string(), amount))
}

pub struct App {
    client: HttpClient,
    pub cfg: DashConfig,
    pub lang: Lang,
    pub selection: Selection,
    pub days_filter: Option<u32>,
    pub mode: Mode,
    pub range_form: RangeForm,
    pub record_form: RecordForm,
    pub plan_input: Input,
    pub today_cards: Option<CardSet>,
    pub totals_cards: Option<CardSet>,
    pub table: Option<TableView>,
    pub status: Option<String>,
    pub alert: Option<String>,
    summary_token: u64,
    records_token: u64,
    tx: UnboundedSender<AppEvent>,
    rx: Option<UnboundedReceiver<AppEvent>>,
    should_quit: bool,
}

impl App {
    pub fn new(client: HttpClient, cfg: DashConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let lang = Lang::from_code(&cfg.lang);
        let today = Self::today();
        Self {
            client,
            lang,
            selection: Selection::default(),
            days_filter: None,
            mode: Mode::default(),
            range_form: RangeForm {
                start: Input::default(),
                end: Input::default(),
                group: Grouping::Daily,
                focus: 0,
            },
            record_form: RecordForm {
                date: Input::new(today.to_string()),
                record_type: RecordType::Sale,
                amount: Input::default(),
                focus: 0,
            },
            plan_input: Input::default(),
            today_cards: None,
            totals_cards: None,
            table: None,
            status: None,
            alert: None,
            summary_token: 0,
            records_token: 0,
            tx,
            rx: Some(rx),
            should_quit: false,
            cfg,
        }
    }

    pub fn strings(&self) -> &'static Strings {
        i18n::strings(self.lang)
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    fn refresh_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cfg.refresh_secs.max(1))
    }

    /// Run the event loop until quit
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut rx = self.rx.take().expect("event receiver taken once");
        let mut events = EventStream::new();
        // The timer fires on a fixed interval whether or not the previous
        // cycle has resolved; stale responses are dropped by token.
        let mut ticker = tokio::time::interval_at(
            tokio::time::Instant::now() + self.refresh_period(),
            self.refresh_period(),
        );

        self.refresh_summary();
        self.refresh_records();

        while !self.should_quit {
            terminal.draw(|frame| crate::ui::draw(frame, &self))?;

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                    None => break,
                },
                _ = ticker.tick() => {
                    self.refresh_summary();
                    self.refresh_records();
                }
                Some(event) = rx.recv() => self.apply_event(event),
            }
        }

        Ok(())
    }

    // ========== Refresh triggers ==========

    fn refresh_summary(&mut self) {
        self.summary_token += 1;
        refresh::spawn_summary(
            self.client.clone(),
            self.selection,
            self.summary_token,
            self.tx.clone(),
        );
    }

    fn refresh_records(&mut self) {
        let plan = refresh::records_plan(&self.selection, self.days_filter);
        self.records_token += 1;
        refresh::spawn_records(self.client.clone(), plan, self.records_token, self.tx.clone());
    }

    fn refresh_all(&mut self) {
        self.refresh_summary();
        self.refresh_records();
    }

    // ========== Input handling ==========

    fn handle_key(&mut self, key: KeyEvent) {
        // An open alert blocks everything until dismissed
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return;
        }

        match self.mode {
            Mode::Normal => self.handle_key_normal(key),
            Mode::Range => self.handle_key_range(key),
            Mode::Record => self.handle_key_record(key),
            Mode::Plan => self.handle_key_plan(key),
        }
    }

    fn handle_key_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => self.refresh_all(),

            KeyCode::Char('1') => self.select_quick_filter(QuickFilter::Today),
            KeyCode::Char('2') => self.select_quick_filter(QuickFilter::Yesterday),
            KeyCode::Char('3') => self.select_quick_filter(QuickFilter::ThisWeek),
            KeyCode::Char('4') => self.select_quick_filter(QuickFilter::LastWeek),
            KeyCode::Char('5') => self.select_quick_filter(QuickFilter::ThisMonth),
            KeyCode::Char('6') => self.select_quick_filter(QuickFilter::LastMonth),
            KeyCode::Char('7') => self.select_quick_filter(QuickFilter::All),

            KeyCode::Char('n') => {
                self.range_form.start = Input::new(
                    self.selection.start_string().unwrap_or_default(),
                );
                self.range_form.end =
                    Input::new(self.selection.end_string().unwrap_or_default());
                self.range_form.group = self.selection.group;
                self.range_form.focus = 0;
                self.mode = Mode::Range;
            }
            KeyCode::Char('a') => {
                if self.record_form.date.value().is_empty() {
                    self.record_form.date = Input::new(Self::today().to_string());
                }
                self.record_form.focus = 0;
                self.mode = Mode::Record;
            }
            KeyCode::Char('p') => {
                if self.cfg.user_id.is_some() {
                    self.plan_input = Input::default();
                    self.mode = Mode::Plan;
                } else {
                    self.status = Some(self.strings().msg_no_user.to_string());
                }
            }
            KeyCode::Char('d') => {
                self.days_filter = match self.days_filter {
                    None => Some(7),
                    Some(7) => Some(30),
                    Some(_) => None,
                };
                self.refresh_records();
            }
            KeyCode::Char('e') => self.export(ExportFormat::Csv),
            KeyCode::Char('x') => self.export(ExportFormat::Excel),
            KeyCode::Char('l') => {
                self.lang = self.lang.next();
                self.status = Some(self.strings().lang_name.to_string());
                let client = self.client.clone();
                let code = self.lang.code();
                tokio::spawn(async move {
                    if let Err(err) = client.set_language(code).await {
                        debug!("set_lang failed: {err}");
                    }
                });
                // Rebuild every painted label in the new language
                self.refresh_all();
            }
            _ => {}
        }
    }

    fn select_quick_filter(&mut self, filter: QuickFilter) {
        self.selection.apply_quick_filter(filter, Self::today());
        self.refresh_all();
    }

    fn handle_key_range(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => self.apply_manual_range(),
            KeyCode::Tab => self.range_form.focus = (self.range_form.focus + 1) % 3,
            KeyCode::BackTab => self.range_form.focus = (self.range_form.focus + 2) % 3,
            _ if self.range_form.focus == 2 => {
                if matches!(key.code, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) {
                    self.range_form.group = self.range_form.group.next();
                }
            }
            _ => {
                let field = if self.range_form.focus == 0 {
                    &mut self.range_form.start
                } else {
                    &mut self.range_form.end
                };
                field.handle_event(&Event::Key(key));
            }
        }
    }

    fn apply_manual_range(&mut self) {
        let s = self.strings();
        let start = match parse_date_field(self.range_form.start.value()) {
            Ok(start) => start,
            Err(()) => {
                self.alert = Some(s.msg_start_invalid.to_string());
                return;
            }
        };
        let end = match parse_date_field(self.range_form.end.value()) {
            Ok(end) => end,
            Err(()) => {
                self.alert = Some(s.msg_end_invalid.to_string());
                return;
            }
        };

        self.selection.apply_manual(start, end, self.range_form.group);
        self.mode = Mode::Normal;
        self.refresh_all();
    }

    fn handle_key_record(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => self.submit_record(),
            KeyCode::Tab => self.record_form.focus = (self.record_form.focus + 1) % 3,
            KeyCode::BackTab => self.record_form.focus = (self.record_form.focus + 2) % 3,
            _ if self.record_form.focus == 1 => {
                if matches!(key.code, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) {
                    self.record_form.record_type = self.record_form.record_type.toggle();
                }
            }
            _ => {
                let field = if self.record_form.focus == 0 {
                    &mut self.record_form.date
                } else {
                    &mut self.record_form.amount
                };
                field.handle_event(&Event::Key(key));
            }
        }
    }

    fn submit_record(&mut self) {
        let s = self.strings();
        let (record_date, amount) = match validate_record(
            self.record_form.date.value(),
            self.record_form.amount.value(),
        ) {
            Ok(valid) => valid,
            Err(RecordValidation::DateRequired) => {
                self.alert = Some(s.msg_date_required.to_string());
                return;
            }
            Err(RecordValidation::AmountInvalid) => {
                self.alert = Some(s.msg_amount_invalid.to_string());
                return;
            }
        };

        let record = NewRecord {
            record_date,
            record_type: self.record_form.record_type,
            amount,
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.add_record(&record).await;
            let _ = tx.send(AppEvent::Submitted(result));
        });
    }

    fn handle_key_plan(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                let plan = self.plan_input.value().trim().to_string();
                let Some(user_id) = self.cfg.user_id else {
                    self.mode = Mode::Normal;
                    return;
                };
                if plan.is_empty() {
                    return;
                }
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.change_plan(user_id, &plan).await;
                    let _ = tx.send(AppEvent::PlanChanged(result));
                });
                self.mode = Mode::Normal;
            }
            _ => {
                self.plan_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let days = self.days_filter;
        let dir = PathBuf::from(&self.cfg.export_dir);
        let name = format!("profitapp-{}.{}", Self::today(), format.extension());
        tokio::spawn(async move {
            let result = async {
                let bytes = client.export(format, days).await.map_err(|e| e.to_string())?;
                tokio::fs::create_dir_all(&dir)
                    .await
                    .map_err(|e| e.to_string())?;
                let path = dir.join(name);
                tokio::fs::write(&path, bytes)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(path)
            }
            .await;
            let _ = tx.send(AppEvent::Exported(result));
        });
    }

    // ========== Event application ==========

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Refresh(outcome) => self.apply_refresh(outcome),
            AppEvent::Submitted(Ok(())) => {
                self.status = Some(self.strings().msg_record_added.to_string());
                // Date and type persist for rapid repeated entry
                self.record_form.amount.reset();
                self.refresh_summary();
                self.refresh_records();
            }
            AppEvent::Submitted(Err(err)) => self.alert = Some(err.to_string()),
            AppEvent::PlanChanged(Ok(())) => {
                self.status = Some(self.strings().msg_plan_changed.to_string());
            }
            AppEvent::PlanChanged(Err(err)) => self.alert = Some(err.to_string()),
            AppEvent::Exported(Ok(path)) => {
                self.status = Some(
                    self.strings()
                        .msg_export_saved
                        .replace("{path}", &path.display().to_string()),
                );
            }
            AppEvent::Exported(Err(err)) => {
                self.status = Some(format!("{}: {err}", self.strings().msg_export_failed));
            }
        }
    }

    fn apply_refresh(&mut self, outcome: Outcome) {
        let s = self.strings();
        match outcome {
            Outcome::Summary { token, result } => {
                if token != self.summary_token {
                    debug!("dropping stale summary response (token {token})");
                    return;
                }
                match result {
                    Ok(fetch) => {
                        self.today_cards = Some(view::today_cards(&fetch.today, s));
                        match fetch.range_totals {
                            None => {
                                self.totals_cards =
                                    Some(view::totals_from_summary(&fetch.today, s));
                            }
                            Some(Ok(totals)) => {
                                self.totals_cards = Some(view::totals_from_range(&totals, s));
                            }
                            Some(Err(err)) => {
                                // Today cards already repainted; keep the
                                // previous totals on screen
                                warn!("ranged summary refresh failed: {err}");
                            }
                        }
                    }
                    Err(err) => warn!("summary refresh failed: {err}"),
                }
            }
            Outcome::Records {
                token,
                plan,
                result,
            } => {
                if token != self.records_token {
                    debug!("dropping stale records response (token {token})");
                    return;
                }
                match result {
                    Ok(fetch) => {
                        let suffix = view::window_suffix(&plan, s);
                        self.table = Some(match fetch {
                            RecordsFetch::Rows(rows) => view::records_table(&rows, suffix, s),
                            RecordsFetch::Groups(groups) => {
                                view::aggregates_table(&groups, suffix, s)
                            }
                        });
                    }
                    Err(err) => warn!("records refresh failed: {err}"),
                }
            }
        }
    }
}

/// Empty text is an open bound; anything else must be an ISO date
fn parse_date_field(text: &str) -> Result<Option<NaiveDate>, ()> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ())
}
