//! Login, catalog, detail and creation screens.
//!
//! # Responsibility
//! - Collect credentials and show connection failures as a banner.
//! - Render the catalog and route commands to the catalog service.
//!
//! # Invariants
//! - Query and write failures are never shown; core already logged them and
//!   the listing stays as it was.

use crate::console::Console;
use partman_core::{
    connect, CatalogService, ConnectorConfig, Credentials, ListingFeed, ListingUpdate,
    MongoPartRepository, Part, PartForm, Session,
};
use std::io;
use tokio::sync::mpsc::UnboundedReceiver;

const CATALOG_HELP: &str =
    "commands: list | search <tags, ...> | add | open <row> | help | quit";

/// Prompts until a session is established. Returns `None` at end of input.
pub async fn login(console: &mut Console, config: &ConnectorConfig) -> io::Result<Option<Session>> {
    let mut banner: Option<String> = None;
    loop {
        println!();
        if let Some(message) = banner.take() {
            println!("!! {message}");
        }
        println!("== Part Manager login ==");

        let Some(username) = console.prompt("Username: ").await? else {
            return Ok(None);
        };
        let Some(password) = console.prompt_secret("Password: ").await? else {
            return Ok(None);
        };

        let credentials = Credentials::new(username, password);
        match connect(&credentials, config).await {
            Ok(session) => return Ok(Some(session)),
            Err(err) => banner = Some(err.to_string()),
        }
    }
}

/// Interactive catalog bound to one session's repository.
pub struct Catalog {
    service: CatalogService<MongoPartRepository>,
    feed: ListingFeed<MongoPartRepository>,
    updates: UnboundedReceiver<ListingUpdate>,
    rows: Vec<Part>,
}

impl Catalog {
    pub fn new(service: CatalogService<MongoPartRepository>) -> Self {
        let (feed, updates) = ListingFeed::new(service.clone());
        Self {
            service,
            feed,
            updates,
            rows: Vec::new(),
        }
    }

    /// Runs the command loop until `quit` or end of input.
    pub async fn run(&mut self, console: &mut Console) -> io::Result<()> {
        self.feed.request_all();
        self.refresh().await;
        println!("{CATALOG_HELP}");

        loop {
            let Some(line) = console.prompt("\npartman> ").await? else {
                return Ok(());
            };
            let line = line.trim();
            let (command, argument) = match line.split_once(' ') {
                Some((command, rest)) => (command, rest.trim()),
                None => (line, ""),
            };

            match command {
                "" => {}
                "list" => {
                    self.feed.request_all();
                    self.refresh().await;
                }
                "search" => {
                    self.feed.request_search(argument);
                    self.refresh().await;
                }
                "add" => self.create(console).await?,
                "open" => match self.row(argument) {
                    Some(part) => self.detail(console, part).await?,
                    None => println!("no such row: `{argument}`"),
                },
                "help" => println!("{CATALOG_HELP}"),
                "quit" | "exit" => return Ok(()),
                other => println!("unknown command `{other}`; {CATALOG_HELP}"),
            }
        }
    }

    async fn refresh(&mut self) {
        if let Some(Ok(parts)) = self.feed.next_current(&mut self.updates).await {
            self.rows = parts;
            self.render();
        }
    }

    fn render(&self) {
        if self.rows.is_empty() {
            println!("(no parts)");
            return;
        }
        for (index, part) in self.rows.iter().enumerate() {
            println!("{:>4}  {:<32}  {}", index + 1, part.name, part.tags.join(", "));
        }
    }

    fn row(&self, argument: &str) -> Option<Part> {
        let index = argument.parse::<usize>().ok()?.checked_sub(1)?;
        self.rows.get(index).cloned()
    }

    async fn create(&mut self, console: &mut Console) -> io::Result<()> {
        println!("-- new part --");
        let Some(form) = read_form(console, &PartForm::default()).await? else {
            return Ok(());
        };
        if self.service.create_part(&form).await.is_ok() {
            self.feed.request_all();
            self.refresh().await;
        }
        Ok(())
    }

    async fn detail(&mut self, console: &mut Console, selected: Part) -> io::Result<()> {
        let part = match self.service.get_part(selected.id).await {
            Ok(Some(part)) => part,
            Ok(None) => {
                println!("part no longer exists");
                self.feed.request_all();
                self.refresh().await;
                return Ok(());
            }
            Err(_) => selected,
        };

        println!("-- part \"{}\" --", part.name);
        let form = PartForm::from_part(&part);
        println!("Name:     {}", form.name);
        println!("Tags:     {}", form.tags_text);
        println!("Location: {}", form.location);
        println!("Quantity: {}", form.qty_text);

        let Some(action) = console.prompt("[e]dit, [d]elete, [b]ack: ").await? else {
            return Ok(());
        };
        match action.trim() {
            "e" | "edit" => {
                let Some(edited) = read_form(console, &form).await? else {
                    return Ok(());
                };
                let _ = self.service.save_part(&part, &edited).await;
            }
            "d" | "delete" => {
                let _ = self.service.delete_part(part.id).await;
            }
            _ => return Ok(()),
        }

        self.feed.request_all();
        self.refresh().await;
        Ok(())
    }
}

async fn read_form(console: &mut Console, current: &PartForm) -> io::Result<Option<PartForm>> {
    let Some(name) = console.prompt_with_default("Name", &current.name).await? else {
        return Ok(None);
    };
    let Some(tags_text) = console
        .prompt_with_default("Tags (comma separated)", &current.tags_text)
        .await?
    else {
        return Ok(None);
    };
    let Some(location) = console
        .prompt_with_default("Location", &current.location)
        .await?
    else {
        return Ok(None);
    };
    let Some(qty_text) = console
        .prompt_with_default("Quantity", &current.qty_text)
        .await?
    else {
        return Ok(None);
    };

    Ok(Some(PartForm {
        name,
        tags_text,
        location,
        qty_text,
    }))
}
