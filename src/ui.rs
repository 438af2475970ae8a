use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as MapLine},
        Axis, BarChart, Block, Borders, Cell, Chart, Dataset, GraphType, List, ListItem,
        ListState, Paragraph, Row, Table, TableState, Wrap,
    },
    Frame, Terminal,
};
use std::io;

use stayscope::pipeline;
use stayscope::{App, Scene, SceneView};

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

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Left | KeyCode::Char('b') => app.retreat(),
                KeyCode::Right | KeyCode::Char('n') => app.advance(),
                KeyCode::Down | KeyCode::Char('j') => app.next_item(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_item(),
                KeyCode::Enter => app.select_current(),
                KeyCode::Home => {
                    if app.item_count() > 0 {
                        app.selected = Some(0);
                    }
                }
                KeyCode::End => {
                    if app.item_count() > 0 {
                        app.selected = Some(app.item_count() - 1);
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with scene tabs
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match &app.view {
        SceneView::Overview { .. } => render_overview(f, chunks[1], app),
        SceneView::Detail { .. } => render_detail(f, chunks[1], app),
        SceneView::Reviews { .. } => render_reviews(f, chunks[1], app),
        SceneView::Insights { .. } => render_insights(f, chunks[1], app),
        SceneView::Failed { .. } => render_failed(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let scenes = [
        (Scene::Overview, "Overview"),
        (Scene::NeighbourhoodDetail, "Neighbourhood"),
        (Scene::ListingReviews, "Reviews"),
        (Scene::Insights, "Insights"),
    ];

    let mut tab_spans = vec![];
    for (i, (scene, name)) in scenes.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" → "));
        }

        let style = if *scene == app.scene {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(*name, style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        app.title(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

// ============================================================================
// SCENE 1: OVERVIEW (boundary map + neighbourhood list)
// ============================================================================

fn render_overview(f: &mut Frame, area: Rect, app: &mut App) {
    let regions = match &app.view {
        SceneView::Overview { regions } => regions.clone(),
        _ => return,
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65), // Boundary map
            Constraint::Percentage(35), // Neighbourhood list
        ])
        .split(area);

    let (x_bounds, y_bounds) = match regions.bounds() {
        Some(b) => ([b.min_lon, b.max_lon], [b.min_lat, b.max_lat]),
        None => ([0.0, 1.0], [0.0, 1.0]),
    };

    let selected = app.selected;
    let map = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Neighbourhoods "),
        )
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            // Draw the highlighted region last so it stays on top.
            for pass in [false, true] {
                for (i, region) in regions.regions.iter().enumerate() {
                    let highlighted = selected == Some(i);
                    if highlighted != pass {
                        continue;
                    }
                    let color = if highlighted { Color::Yellow } else { Color::Gray };
                    for ring in &region.rings {
                        for pair in ring.windows(2) {
                            ctx.draw(&MapLine {
                                x1: pair[0].0,
                                y1: pair[0].1,
                                x2: pair[1].0,
                                y2: pair[1].1,
                                color,
                            });
                        }
                    }
                }
            }
        });

    f.render_widget(map, chunks[0]);

    let items: Vec<ListItem> = regions
        .regions
        .iter()
        .map(|r| ListItem::new(r.name.clone()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Select a neighbourhood "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    let mut state = ListState::default();
    state.select(app.selected);
    f.render_stateful_widget(list, chunks[1], &mut state);
}

// ============================================================================
// SCENE 2: NEIGHBOURHOOD DETAIL (price vs. reviews/month scatter + table)
// ============================================================================

fn render_detail(f: &mut Frame, area: Rect, app: &mut App) {
    let listings = match &app.view {
        SceneView::Detail { listings } => listings.clone(),
        _ => return,
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Scatter plot
            Constraint::Percentage(40), // Listing table
        ])
        .split(area);

    let x_max = pipeline::max_price(&listings).max(1.0);
    let y_max = pipeline::max_reviews_per_month(&listings).max(1.0);

    let points: Vec<(f64, f64)> = listings
        .iter()
        .map(|l| (l.price, l.reviews_per_month))
        .collect();
    let highlighted: Vec<(f64, f64)> = app
        .selected
        .and_then(|i| listings.get(i))
        .map(|l| vec![(l.price, l.reviews_per_month)])
        .unwrap_or_default();

    let datasets = vec![
        Dataset::default()
            .name("listings")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Blue))
            .data(&points),
        Dataset::default()
            .name("selected")
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&highlighted),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Price vs. Reviews/Month "),
        )
        .x_axis(
            Axis::default()
                .title("Price")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", x_max / 2.0)),
                    Span::raw(format!("{:.0}", x_max)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Reviews/Month")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.1}", y_max / 2.0)),
                    Span::raw(format!("{:.1}", y_max)),
                ]),
        );

    f.render_widget(chart, chunks[0]);

    render_listing_table(f, chunks[1], app, &listings);
}

fn render_listing_table(f: &mut Frame, area: Rect, app: &App, listings: &[stayscope::Listing]) {
    let header_cells = ["Name", "Price", "Rev/Mo"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = listings.iter().map(|l| {
        let cells = vec![
            Cell::from(truncate(&l.name, 24)),
            Cell::from(format!("{:.0}", l.price)),
            Cell::from(format!("{:.1}", l.reviews_per_month)),
        ];
        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(26),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Listings "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    let mut state = TableState::default();
    state.select(app.selected);
    f.render_stateful_widget(table, area, &mut state);
}

// ============================================================================
// SCENE 3: LISTING REVIEWS (rating over time)
// ============================================================================

fn render_reviews(f: &mut Frame, area: Rect, app: &mut App) {
    let reviews = match &app.view {
        SceneView::Reviews { reviews } => reviews.clone(),
        _ => return,
    };

    if reviews.is_empty() {
        let empty = Paragraph::new("No reviews for this listing").block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Rating over time "),
        );
        f.render_widget(empty, area);
        return;
    }

    let (first, last) = match pipeline::date_extent(&reviews) {
        Some(extent) => extent,
        None => return,
    };
    let span_days = ((last - first).num_days() as f64).max(1.0);

    // X positions are days since the first review; the axis labels carry
    // the actual dates.
    let points: Vec<(f64, f64)> = reviews
        .iter()
        .map(|r| ((r.date - first).num_days() as f64, r.rating))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("rating")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::LightGreen))
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Rating over time "),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, span_days])
                .labels(vec![
                    Span::raw(first.to_string()),
                    Span::raw(last.to_string()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Rating")
                .style(Style::default().fg(Color::Gray))
                // Rating scale is 0-5, fixed regardless of the data
                .bounds([0.0, 5.0])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw("1"),
                    Span::raw("2"),
                    Span::raw("3"),
                    Span::raw("4"),
                    Span::raw("5"),
                ]),
        );

    f.render_widget(chart, area);
}

// ============================================================================
// SCENE 4: AGGREGATED INSIGHTS (bar chart + summary table)
// ============================================================================

fn render_insights(f: &mut Frame, area: Rect, app: &mut App) {
    let insights = match &app.view {
        SceneView::Insights { insights } => insights.clone(),
        _ => return,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55), // Avg price bars
            Constraint::Percentage(45), // Summary table
        ])
        .split(area);

    let labels: Vec<String> = insights
        .iter()
        .map(|i| truncate(&i.neighbourhood, 10))
        .collect();
    let bars: Vec<(&str, u64)> = labels
        .iter()
        .zip(&insights)
        .map(|(label, i)| (label.as_str(), i.avg_price.round() as u64))
        .collect();

    let bar_chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Avg Price by Neighbourhood "),
        )
        .data(&bars[..])
        .bar_width(11)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(bar_chart, chunks[0]);

    let header_cells = ["Neighbourhood", "Listings", "Avg Price", "Avg Rev/Mo"]
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

    let rows = insights.iter().map(|i| {
        let cells = vec![
            Cell::from(truncate(&i.neighbourhood, 22)),
            Cell::from(format!("{}", i.listing_count)),
            Cell::from(format!("{:.2}", i.avg_price)),
            Cell::from(format!("{:.2}", i.avg_reviews_per_month)),
        ];
        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Insights "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    let mut state = TableState::default();
    state.select(app.selected);
    f.render_stateful_widget(table, chunks[1], &mut state);
}

// ============================================================================
// LOAD FAILURE
// ============================================================================

fn render_failed(f: &mut Frame, area: Rect, app: &App) {
    let message = match &app.view {
        SceneView::Failed { message } => message.clone(),
        _ => return,
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Could not load this scene's data",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Press "),
            Span::styled("b", Style::default().fg(Color::Yellow)),
            Span::raw(" to go back or "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" to quit."),
        ]),
    ];

    let panel = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Load failed "),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.selected.map(|i| i + 1).unwrap_or(0);
    let total = app.item_count();

    let mut status_spans = vec![Span::styled(
        format!(" Item: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    // Navigation hints depend on where we are in the chain.
    if app.scene.has_back() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("←/b", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Back"));
    }
    if app.scene.has_next() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("→/n", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Next"));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Select | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
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
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
