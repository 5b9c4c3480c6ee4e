use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hotel_reservations::{
    submit_reservation, BookingForm, Person, Reservation, ReservationError, ReservationStore,
    RoomCategory,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Booking,
    Reservations,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Booking => Page::Reservations,
            Page::Reservations => Page::Booking,
        }
    }

    pub fn previous(&self) -> Self {
        // Only two pages
        self.next()
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Booking => "New Reservation",
            Page::Reservations => "Reservations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    NationalId,
    Birthdate,
    Address,
    Phone,
    Email,
    CheckIn,
    CheckOut,
    Room,
    Price,
    Payment,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::Name,
        FormField::NationalId,
        FormField::Birthdate,
        FormField::Address,
        FormField::Phone,
        FormField::Email,
        FormField::CheckIn,
        FormField::CheckOut,
        FormField::Room,
        FormField::Price,
        FormField::Payment,
    ];

    pub fn label(&self) -> &str {
        match self {
            FormField::Name => "Name",
            FormField::NationalId => "CPF",
            FormField::Birthdate => "Birthdate (dd/mm/yyyy)",
            FormField::Address => "Address",
            FormField::Phone => "Phone",
            FormField::Email => "Email",
            FormField::CheckIn => "Check-in (dd/mm/yyyy)",
            FormField::CheckOut => "Check-out (dd/mm/yyyy)",
            FormField::Room => "Room type",
            FormField::Price => "Price override",
            FormField::Payment => "Payment",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub store: ReservationStore,
    pub form: BookingForm,
    /// Price is typed as text and parsed on submit
    pub price_text: String,
    pub focus: usize,
    pub current_page: Page,
    pub state: TableState,
    pub status: Option<StatusMessage>,
    pub last_confirmed: Option<Reservation>,
}

impl App {
    pub fn new(store: ReservationStore) -> Self {
        let mut state = TableState::default();
        if !store.is_empty() {
            state.select(Some(0));
        }

        Self {
            store,
            form: BookingForm::default(),
            price_text: String::new(),
            focus: 0,
            current_page: Page::Booking,
            state,
            status: None,
            last_confirmed: None,
        }
    }

    pub fn focused_field(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::ALL.len();
    }

    pub fn focus_previous(&mut self) {
        let len = FormField::ALL.len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    fn field_text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.form.name),
            FormField::NationalId => Some(&mut self.form.national_id),
            FormField::Birthdate => Some(&mut self.form.birthdate),
            FormField::Address => Some(&mut self.form.address),
            FormField::Phone => Some(&mut self.form.phone),
            FormField::Email => Some(&mut self.form.email),
            FormField::CheckIn => Some(&mut self.form.check_in),
            FormField::CheckOut => Some(&mut self.form.check_out),
            FormField::Room => None,
            FormField::Price => Some(&mut self.price_text),
            FormField::Payment => Some(&mut self.form.payment),
        }
    }

    pub fn field_value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.form.name.clone(),
            FormField::NationalId => self.form.national_id.clone(),
            FormField::Birthdate => self.form.birthdate.clone(),
            FormField::Address => self.form.address.clone(),
            FormField::Phone => self.form.phone.clone(),
            FormField::Email => self.form.email.clone(),
            FormField::CheckIn => self.form.check_in.clone(),
            FormField::CheckOut => self.form.check_out.clone(),
            FormField::Room => match self.form.room_category {
                Some(category) => format!(
                    "◀ {} - R${:.0}/night ▶",
                    category,
                    category.nightly_price()
                ),
                None => "◀ (choose with ←/→) ▶".to_string(),
            },
            FormField::Price => self.price_text.clone(),
            FormField::Payment => self.form.payment.clone(),
        }
    }

    pub fn input_char(&mut self, c: char) {
        let field = self.focused_field();
        if field == FormField::Room {
            // 1/2/3 pick a category directly
            if let Some(index) = c.to_digit(10) {
                if (1..=3).contains(&index) {
                    self.form.room_category = Some(RoomCategory::ALL[index as usize - 1]);
                }
            }
            return;
        }
        if let Some(text) = self.field_text_mut(field) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused_field();
        if field == FormField::Room {
            self.form.room_category = None;
            return;
        }
        if let Some(text) = self.field_text_mut(field) {
            text.pop();
        }
    }

    /// Step through the room categories (None → Simple → Luxury → Premium)
    pub fn cycle_room(&mut self, forward: bool) {
        let all = RoomCategory::ALL;
        let current = self
            .form
            .room_category
            .and_then(|c| all.iter().position(|x| *x == c));

        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => all.len() - 1,
            (Some(i), true) => (i + 1) % all.len(),
            (Some(i), false) => (i + all.len() - 1) % all.len(),
        };
        self.form.room_category = Some(all[next]);
    }

    /// Show a failed startup load; `r` on the Reservations page retries it
    pub fn report_load_error(&mut self, err: &ReservationError) {
        self.set_status(
            format!("Error: could not load reservations: {} (press r to retry)", err),
            true,
        );
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some(StatusMessage { text, is_error });
    }

    /// Submit the form; on success the form is cleared for the next guest
    pub fn submit(&mut self) {
        let price_text = self.price_text.trim().to_string();
        self.form.price = if price_text.is_empty() {
            None
        } else {
            match price_text.replace(',', ".").parse::<f64>() {
                Ok(price) => Some(price),
                Err(_) => {
                    self.set_status(format!("Error: invalid price '{}'", price_text), true);
                    return;
                }
            }
        };

        match submit_reservation(&mut self.store, &self.form) {
            Ok(reservation) => {
                self.set_status(
                    format!("Reservation confirmed for {}", reservation.client().name()),
                    false,
                );
                self.last_confirmed = Some(reservation);
                self.form = BookingForm::default();
                self.price_text.clear();
                self.focus = 0;
                if self.state.selected().is_none() {
                    self.state.select(Some(0));
                }
            }
            Err(err) => {
                self.set_status(format!("Error: {}", err), true);
            }
        }
    }

    /// Re-read the backing file for the admin list
    pub fn reload(&mut self) {
        match self.store.reload() {
            Ok(()) => {
                let count = self.store.len();
                self.set_status(format!("Reloaded {} reservations", count), false);
                self.state.select(if count == 0 { None } else { Some(0) });
            }
            Err(err) => {
                error!("Reload failed: {}", err);
                self.set_status(format!("Error: {}", err), true);
            }
        }
    }

    pub fn selected_reservation(&self) -> Option<&Reservation> {
        self.state
            .selected()
            .and_then(|i| self.store.reservations().get(i))
    }

    pub fn next(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("UI loop failed: {}", err);
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        match key.code {
            KeyCode::Esc => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            KeyCode::Tab => app.next_page(),
            KeyCode::BackTab => app.previous_page(),
            _ => match app.current_page {
                Page::Booking => handle_booking_key(app, key.code),
                Page::Reservations => handle_reservations_key(app, key.code),
            },
        }
    }
}

fn handle_booking_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.submit(),
        KeyCode::Down => app.focus_next(),
        KeyCode::Up => app.focus_previous(),
        KeyCode::Left if app.focused_field() == FormField::Room => app.cycle_room(false),
        KeyCode::Right if app.focused_field() == FormField::Room => app.cycle_room(true),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {}
    }
}

fn handle_reservations_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => app.next(),
        KeyCode::Up | KeyCode::Char('k') => app.previous(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Home => {
            if !app.store.is_empty() {
                app.state.select(Some(0));
            }
        }
        KeyCode::End => {
            if !app.store.is_empty() {
                app.state.select(Some(app.store.len() - 1));
            }
        }
        _ => {}
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    match app.current_page {
        Page::Booking => {
            render_form(f, content_chunks[0], app);
            let confirmed = app.last_confirmed.as_ref().map(Reservation::describe);
            render_detail_panel(f, content_chunks[1], " Last Confirmation ", confirmed);
        }
        Page::Reservations => {
            render_table(f, content_chunks[0], app);
            let selected = app.selected_reservation().map(Reservation::describe);
            render_detail_panel(f, content_chunks[1], " Reservation Details ", selected);
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in [Page::Booking, Page::Reservations].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Stored: {}", app.store.len()),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Hotel Reservations "),
    );

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focused_field();

    let mut content = vec![Line::from("")];
    for field in FormField::ALL {
        let is_focused = field == focused;
        let label_style = if is_focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let mut value = app.field_value(field);
        if is_focused && field != FormField::Room {
            value.push('_');
        }

        content.push(Line::from(vec![
            Span::styled(if is_focused { " → " } else { "   " }, label_style),
            Span::styled(format!("{:<24}", field.label()), label_style),
            Span::raw(value),
        ]));
    }

    let form = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Booking Form "),
    );

    f.render_widget(form, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Name", "CPF", "Check-in", "Check-out", "Room", "Price"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.store.reservations().iter().map(|r| {
        let color = match r.room_category() {
            RoomCategory::Simple => Color::White,
            RoomCategory::Luxury => Color::Cyan,
            RoomCategory::Premium => Color::Magenta,
        };

        let cells = vec![
            Cell::from(truncate(r.client().name(), 20)),
            Cell::from(r.client().national_id().to_string()),
            Cell::from(r.check_in().format("%d/%m/%Y").to_string()),
            Cell::from(r.check_out().format("%d/%m/%Y").to_string()),
            Cell::from(r.room_category().name()).style(Style::default().fg(color)),
            Cell::from(format!("{:.2}", r.price())),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Length(13),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Stored Reservations "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, title: &str, text: Option<String>) {
    let body = text.unwrap_or_else(|| "Nothing to show yet".to_string());

    let content: Vec<Line> = std::iter::once(Line::from(""))
        .chain(body.lines().map(|l| Line::from(format!("  {}", l))))
        .collect();

    let panel = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title.to_string()),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let Some(status) = &app.status {
        let color = if status.is_error { Color::Red } else { Color::Green };
        status_spans.push(Span::styled(
            format!(" {} ", status.text),
            Style::default().fg(color),
        ));
        status_spans.push(Span::raw(" | "));
    }

    let hints: &[(&str, &str)] = match app.current_page {
        Page::Booking => &[("↑/↓", " Field | "), ("←/→", " Room | "), ("Enter", " Save | ")][..],
        Page::Reservations => &[("↑/↓", " Nav | "), ("r", " Reload | ")][..],
    };
    for (key, text) in hints {
        status_spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(*text));
    }
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_app() -> (App, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = ReservationStore::open(temp_dir.path().join("reservations.txt")).unwrap();
        (App::new(store), temp_dir)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.input_char(c);
        }
    }

    fn fill_ana(app: &mut App) {
        type_text(app, "Ana Silva");
        app.focus_next();
        type_text(app, "12345678901");
        // Skip to the room field
        while app.focused_field() != FormField::Room {
            app.focus_next();
        }
        app.input_char('1');
    }

    #[test]
    fn test_page_cycle() {
        assert_eq!(Page::Booking.next(), Page::Reservations);
        assert_eq!(Page::Reservations.previous(), Page::Booking);
    }

    #[test]
    fn test_focus_wraps() {
        let (mut app, _temp_dir) = setup_test_app();
        assert_eq!(app.focused_field(), FormField::Name);
        app.focus_previous();
        assert_eq!(app.focused_field(), FormField::Payment);
        app.focus_next();
        assert_eq!(app.focused_field(), FormField::Name);
    }

    #[test]
    fn test_typing_and_backspace() {
        let (mut app, _temp_dir) = setup_test_app();
        type_text(&mut app, "Anaa");
        app.backspace();
        assert_eq!(app.form.name, "Ana");
    }

    #[test]
    fn test_cycle_room() {
        let (mut app, _temp_dir) = setup_test_app();
        app.cycle_room(true);
        assert_eq!(app.form.room_category, Some(RoomCategory::Simple));
        app.cycle_room(false);
        assert_eq!(app.form.room_category, Some(RoomCategory::Premium));
    }

    #[test]
    fn test_submit_success_clears_form() {
        let (mut app, _temp_dir) = setup_test_app();
        fill_ana(&mut app);

        app.submit();

        let status = app.status.clone().unwrap();
        assert!(!status.is_error, "{}", status.text);
        assert_eq!(app.store.len(), 1);
        assert!(app.form.name.is_empty());
        assert_eq!(app.form.room_category, None);
        assert_eq!(app.last_confirmed.as_ref().unwrap().price(), 150.0);
        assert_eq!(app.selected_reservation().unwrap().client().name(), "Ana Silva");
    }

    #[test]
    fn test_submit_error_keeps_form() {
        let (mut app, _temp_dir) = setup_test_app();
        type_text(&mut app, "Ana Silva");
        app.focus_next();
        type_text(&mut app, "123");

        app.submit();

        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("CPF"));
        assert_eq!(app.form.name, "Ana Silva");
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_bad_price_text_blocks_submit() {
        let (mut app, _temp_dir) = setup_test_app();
        fill_ana(&mut app);
        app.price_text = "cheap".to_string();

        app.submit();

        assert!(app.status.clone().unwrap().is_error);
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_load_error_shown_and_retried() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reservations.txt");
        std::fs::write(
            &path,
            "Ana Silva,12345678901,01/06/2024,02/06/2024,Simple,abc,\n",
        )
        .unwrap();

        let (store, load_error) = ReservationStore::open_or_empty(&path);
        let mut app = App::new(store);
        app.report_load_error(&load_error.unwrap());

        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("Corrupt price 'abc'"), "{}", status.text);
        assert!(app.store.is_empty());

        std::fs::write(
            &path,
            "Ana Silva,12345678901,01/06/2024,02/06/2024,Simple,150.00,\n",
        )
        .unwrap();
        app.next_page();
        handle_reservations_key(&mut app, KeyCode::Char('r'));

        assert!(!app.status.clone().unwrap().is_error);
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.selected_reservation().unwrap().client().name(), "Ana Silva");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Ana", 10), "Ana");
        assert_eq!(truncate("Maria da Conceição Souza", 10), "Maria d...");
    }
}
