/// Roster Console - terminal front end for the users screen
mod config;
mod input;

use config::AppConfig;
use input::{Input, HELP};
use roster_client::{UsersApi, UsersClient};
use roster_view::{ViewEvent, ViewRuntime};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the rendered screen
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "roster_console=info,roster_view=info,roster_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load()?;
    tracing::info!("Using users service at {}", config.client.base_url);

    let client = UsersClient::new(config.client.clone())?;
    let mut runtime = ViewRuntime::new(Arc::new(client), config.view.clone());

    runtime.mount()?;
    print_screen(&runtime);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(events) = runtime.next_completion() => {
                report(&events);
                print_screen(&runtime);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if handle_line(&mut runtime, &line) == Flow::Quit {
                    break;
                }
            }
        }
    }

    let events = runtime.teardown();
    tracing::debug!("Shut down: {:?}", events);

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_line<A: UsersApi + 'static>(runtime: &mut ViewRuntime<A>, line: &str) -> Flow {
    let input = match input::parse(line) {
        Ok(Some(input)) => input,
        Ok(None) => return Flow::Continue,
        Err(e) => {
            println!("{}", e);
            return Flow::Continue;
        }
    };

    let result = match input {
        Input::Edit { field, value } => runtime.edit(field, value),
        Input::Submit => runtime.submit(),
        Input::Reset => runtime.reset_form(),
        Input::Reload => runtime.reload(),
        Input::Toggle(key) => {
            let found = runtime
                .view()
                .users()
                .ids()
                .find(|id| id.matches(&key))
                .cloned();
            match found {
                Some(id) => runtime.toggle_row(&id),
                None => {
                    println!("No user with id {}", key);
                    return Flow::Continue;
                }
            }
        }
        Input::Help => {
            println!("{}", HELP);
            return Flow::Continue;
        }
        Input::Quit => return Flow::Quit,
    };

    match result {
        Ok(events) => {
            report(&events);
            print_screen(runtime);
        }
        Err(e) => println!("{}", e),
    }

    Flow::Continue
}

/// Print notices the rendered screen does not carry
fn report(events: &[ViewEvent]) {
    for event in events {
        match event {
            ViewEvent::SubmitRejected => println!("A submission is already in progress."),
            ViewEvent::UserCreated { user: Some(user) } => {
                println!("Created {}.", user.display_name());
            }
            ViewEvent::UserCreated { user: None } => println!("User created."),
            _ => {}
        }
    }
}

fn print_screen<A: UsersApi + 'static>(runtime: &ViewRuntime<A>) {
    println!("\n{}", runtime.render());
}
