use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{info, warn};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use travel_invoice::{
    complete_invoice, config, logging,
    invoice_gen::{format_total, InvoiceRenderer},
    pdf::PdfInvoiceWriter,
    session::Session,
    ui::{
        customer_form::{self, render_customer_form, CustomerFormAction, CustomerFormState},
        entry_wizard::{self, render_entry_wizard, EntryWizardAction, EntryWizardState},
        saved::{self, render_saved, SavedAction, SavedState},
    },
};

// Represents the current screen in the app
enum AppScreen {
    CustomerForm,
    EntryWizard,
    Saved,
}

// Main application state
struct AppState {
    session: Session,
    renderer: InvoiceRenderer,
    writer: PdfInvoiceWriter,
    screen: AppScreen,
    customer_form_state: CustomerFormState,
    entry_wizard_state: EntryWizardState,
    saved_state: Option<SavedState>,
}

impl AppState {
    fn new(renderer: InvoiceRenderer, writer: PdfInvoiceWriter) -> Self {
        Self {
            session: Session::new(),
            renderer,
            writer,
            screen: AppScreen::CustomerForm,
            customer_form_state: CustomerFormState::new(),
            entry_wizard_state: EntryWizardState::new(),
            saved_state: None,
        }
    }

    fn show_customer_form(&mut self) {
        self.session.reset();
        self.customer_form_state = CustomerFormState::new();
        self.screen = AppScreen::CustomerForm;
    }
}

fn main() -> Result<()> {
    // Load configuration
    let config = config::init()?;
    logging::init(&config)?;
    info!(output_dir = %config.output_dir, "starting travel invoice");

    let renderer = InvoiceRenderer::new(&config.date_format);
    let writer = PdfInvoiceWriter::new(&config.output_dir)?;

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(renderer, writer);

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app_state);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        warn!(error = %err, "exiting with error");
        println!("Error: {}", err);
    }

    println!("Invoices are saved in {}", app_state.writer.output_dir().display());
    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| match app_state.screen {
            AppScreen::CustomerForm => {
                render_customer_form(f, &app_state.customer_form_state, &app_state.session)
            }
            AppScreen::EntryWizard => {
                render_entry_wizard(f, &app_state.entry_wizard_state, &app_state.session)
            }
            AppScreen::Saved => {
                if let Some(state) = &app_state.saved_state {
                    render_saved(f, state);
                }
            }
        })?;

        let should_quit = match app_state.screen {
            AppScreen::CustomerForm => handle_customer_form_screen(app_state)?,
            AppScreen::EntryWizard => handle_entry_wizard_screen(app_state)?,
            AppScreen::Saved => handle_saved_screen(app_state)?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_customer_form_screen(app_state: &mut AppState) -> Result<bool> {
    match customer_form::handle_input(&mut app_state.customer_form_state, &mut app_state.session)? {
        Some(CustomerFormAction::Quit) => return Ok(true),
        Some(CustomerFormAction::Started) => {
            app_state.entry_wizard_state = EntryWizardState::new();
            app_state.screen = AppScreen::EntryWizard;
        }
        None => {}
    }

    Ok(false)
}

fn handle_entry_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    match entry_wizard::handle_input(&mut app_state.entry_wizard_state, &mut app_state.session)? {
        Some(EntryWizardAction::Cancel) => {
            info!("invoice abandoned");
            app_state.show_customer_form();
        }
        Some(EntryWizardAction::Complete(entries)) => {
            let (document, written) = complete_invoice(
                &mut app_state.session,
                &app_state.renderer,
                &app_state.writer,
                &entries,
            );

            app_state.saved_state = Some(SavedState {
                bill_no: document.bill_no.clone(),
                total: format_total(document.total_amount),
                amount_in_words: document.amount_in_words.clone(),
                outcome: written
                    .map(|path| path.display().to_string())
                    .map_err(|err| err.to_string()),
            });
            app_state.screen = AppScreen::Saved;
        }
        None => {}
    }

    Ok(false)
}

fn handle_saved_screen(app_state: &mut AppState) -> Result<bool> {
    match saved::handle_input()? {
        Some(SavedAction::Quit) => return Ok(true),
        Some(SavedAction::NewInvoice) => {
            app_state.saved_state = None;
            app_state.show_customer_form();
        }
        None => {}
    }

    Ok(false)
}
