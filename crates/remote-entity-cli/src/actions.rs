//! Command handlers. Each one builds the client it needs from the config,
//! runs a single operation and prints the result.

use std::io::{self, Write};

use anyhow::{anyhow, Result};
use clap::ArgMatches;
use remote_entity_core::{ApiClient, Config, Session, SessionState, TodoClient};
use tracing::warn;

use crate::render;

pub async fn dispatch(matches: &ArgMatches, config: &mut Config) -> Result<()> {
    match matches.subcommand() {
        Some(("status", _)) => status(config),
        Some(("login", m)) => login(config, m).await,
        Some(("signup", m)) => signup(config, m).await,
        Some(("logout", _)) => logout(config),
        Some(("whoami", _)) => whoami(config).await,
        Some(("todo", m)) => todo(config, m).await,
        _ => Err(anyhow!("Unknown command")),
    }
}

fn open_session(config: &Config) -> Result<Session> {
    let mut session = Session::from_config(config)?;
    session.load()?;
    Ok(session)
}

fn status(config: &Config) -> Result<()> {
    let session = open_session(config)?;
    match session.state() {
        SessionState::Authenticated => println!("Authenticated"),
        SessionState::Anonymous => println!("Anonymous"),
    }
    Ok(())
}

async fn login(config: &mut Config, matches: &ArgMatches) -> Result<()> {
    let username = match matches.get_one::<String>("username") {
        Some(username) => username.clone(),
        None => prompt_username(config.last_username.as_deref())?,
    };
    let password = match matches.get_one::<String>("password") {
        Some(password) => password.clone(),
        None => rpassword::prompt_password("Password: ")?,
    };

    let api = ApiClient::from_config(config)?;
    let mut session = open_session(config)?;
    api.login(&mut session, &username, &password).await?;

    if let Err(e) = config.remember_username(&username) {
        warn!(error = %e, "Failed to save config");
    }

    println!("Login successful");
    Ok(())
}

async fn signup(config: &Config, matches: &ArgMatches) -> Result<()> {
    let username = matches
        .get_one::<String>("username")
        .ok_or_else(|| anyhow!("Username is required"))?;
    let email = matches
        .get_one::<String>("email")
        .ok_or_else(|| anyhow!("Email is required"))?;
    let password = match matches.get_one::<String>("password") {
        Some(password) => password.clone(),
        None => rpassword::prompt_password("Password: ")?,
    };

    let api = ApiClient::from_config(config)?;
    let confirmation = api.signup(username, email, &password).await?;

    println!("{}", confirmation);
    println!("You can now log in with `remote-entity login -u {}`", username);
    Ok(())
}

fn logout(config: &Config) -> Result<()> {
    let api = ApiClient::from_config(config)?;
    let mut session = open_session(config)?;
    api.logout(&mut session)?;
    println!("Logged out");
    Ok(())
}

async fn whoami(config: &Config) -> Result<()> {
    let api = ApiClient::from_config(config)?;
    let mut session = open_session(config)?;
    let greeting = api.fetch_secure_data(&mut session).await?;
    print!("{}", render::greeting(&greeting));
    Ok(())
}

async fn todo(config: &Config, matches: &ArgMatches) -> Result<()> {
    let client = TodoClient::from_config(config)?;

    let todos = match matches.subcommand() {
        Some(("list", _)) => client.get_all().await?,
        Some(("get", m)) => {
            let id = required_id(m)?;
            match client.get_by_id(id).await? {
                Some(todo) => vec![todo],
                None => return Err(anyhow!("Todo {} not found", id)),
            }
        }
        Some(("add", m)) => {
            client
                .add(required_title(m)?, m.get_flag("completed"))
                .await?
        }
        Some(("update", m)) => {
            client
                .update(required_id(m)?, required_title(m)?, m.get_flag("completed"))
                .await?
        }
        Some(("delete", m)) => client.delete(required_id(m)?).await?,
        _ => return Err(anyhow!("Unknown todo command")),
    };

    print!("{}", render::todo_table(&todos));
    Ok(())
}

fn required_id(matches: &ArgMatches) -> Result<i64> {
    matches
        .get_one::<i64>("id")
        .copied()
        .ok_or_else(|| anyhow!("Todo id is required"))
}

fn required_title(matches: &ArgMatches) -> Result<&str> {
    matches
        .get_one::<String>("title")
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Todo title is required"))
}

fn prompt_username(last: Option<&str>) -> Result<String> {
    match last {
        Some(last) => print!("Username [{}]: ", last),
        None => print!("Username: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    match (input.is_empty(), last) {
        (true, Some(last)) => Ok(last.to_string()),
        _ => Ok(input.to_string()),
    }
}
