use std::io::{Stdout, stdout};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition};
use ratatui::{Frame, Terminal};

use crate::report::{DailyTotal, daily_series};
use crate::transaction::{Transaction, format_amount, format_date};

const TITLE: &str = "Income and Expenses Over Time";

type ChartTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Points of both lines. x is the day offset from the first day of the series.
struct ChartData {
    income: Vec<(f64, f64)>,
    expense: Vec<(f64, f64)>,
    x_max: f64,
    y_max: f64,
}

impl ChartData {
    fn new(series: &[DailyTotal]) -> ChartData {
        let income: Vec<(f64, f64)> = series.iter().enumerate().map(|(i, d)| (i as f64, d.income)).collect();
        let expense: Vec<(f64, f64)> = series.iter().enumerate().map(|(i, d)| (i as f64, d.expense)).collect();
        let highest = series.iter().map(|d| d.income.max(d.expense)).fold(0.0, f64::max);

        ChartData {
            income,
            expense,
            x_max: (series.len().saturating_sub(1) as f64).max(1.0),
            y_max: if highest > 0.0 { highest * 1.1 } else { 1.0 },
        }
    }
}

/// Draw the daily income and expense lines of `transactions` in the full terminal and wait for a key press.
pub(crate) fn plot_transactions(transactions: &[Transaction]) -> anyhow::Result<()> {
    let series = daily_series(transactions);
    let mut terminal = setup_terminal()?;
    let result = show_until_key(&mut terminal, &series);
    restore_terminal(&mut terminal)?;
    result
}

fn show_until_key(terminal: &mut ChartTerminal, series: &[DailyTotal]) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            render_chart(frame, area, series)
        })?;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
            // Redraw on resize and anything else
            _ => {}
        }
    }
}

pub(crate) fn render_chart(frame: &mut Frame, area: Rect, series: &[DailyTotal]) {
    let data = ChartData::new(series);

    let datasets = vec![
        Dataset::default()
            .name("Income")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&data.income),
        Dataset::default()
            .name("Expense")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&data.expense),
    ];

    let x_labels: Vec<String> = match (series.first(), series.get(series.len() / 2), series.last()) {
        (Some(first), Some(middle), Some(last)) if series.len() > 2 => {
            vec![format_date(first.date), format_date(middle.date), format_date(last.date)]
        },
        (Some(first), _, Some(last)) => vec![format_date(first.date), format_date(last.date)],
        _ => vec![],
    };
    let y_labels = vec![
        format_amount(0.0),
        format_amount(data.y_max / 2.0),
        format_amount(data.y_max),
    ];

    let chart = Chart::new(datasets)
        .block(Block::bordered().title(TITLE).title_bottom(" press any key to close "))
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, data.x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Amount")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, data.y_max])
                .labels(y_labels),
        )
        .legend_position(Some(LegendPosition::TopLeft));

    frame.render_widget(chart, area);
}

fn setup_terminal() -> anyhow::Result<ChartTerminal> {
    enable_raw_mode()?;
    let terminal = enter_alternate_screen(stdout(), Terminal::new);
    if terminal.is_err() {
        // Leave the shell usable when the screen could not be set up
        let _ = disable_raw_mode();
    }
    terminal
}

/// Switch `out` to the alternate screen and wrap it in a terminal built by `new_terminal`
fn enter_alternate_screen<W, T, F>(mut out: W, new_terminal: F) -> anyhow::Result<T>
where
    W: std::io::Write,
    F: FnOnce(CrosstermBackend<W>) -> std::io::Result<T>,
{
    crossterm::execute!(out, EnterAlternateScreen)?;
    Ok(new_terminal(CrosstermBackend::new(out))?)
}

fn restore_terminal(terminal: &mut ChartTerminal) -> anyhow::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
