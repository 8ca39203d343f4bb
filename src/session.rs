//! Interactive terminal session over a [`PlantStore`].
//!
//! Each input line is one command (`add`, `edit`, `water`, `remove`, `list`,
//! `show`, `categories`, `help`, `quit`). Values containing spaces are written
//! in double quotes: `add "Aloe Vera" --type Succulent`.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::StoreError;
use crate::form::PlantForm;
use crate::models::{PlantId, WateringTime};
use crate::render::{render_detail, render_list};
use crate::store::{PlantListView, PlantStore};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Add a new plant
    Add(AddArgs),
    /// Edit an existing plant
    Edit(EditArgs),
    /// Record a watering today
    Water { id: PlantId },
    /// Remove a plant
    Remove { id: PlantId },
    /// List all plants
    List,
    /// Show one plant in detail
    Show { id: PlantId },
    /// List recognized plant types and sunlight options
    Categories,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Args, Debug)]
struct AddArgs {
    /// Plant name
    name: String,
    /// Plant type (see `categories`)
    #[arg(short = 't', long = "type")]
    plant_type: String,
    /// Sunlight requirement
    #[arg(short, long, default_value = "")]
    sunlight: String,
    /// Free-form notes
    #[arg(long, default_value = "")]
    notes: String,
    /// Image URI
    #[arg(long)]
    image: Option<String>,
    /// Watering time as HH:mm (repeatable)
    #[arg(short = 'w', long = "water-at")]
    water_at: Vec<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
    id: PlantId,
    #[arg(short, long)]
    name: Option<String>,
    #[arg(short = 't', long = "type")]
    plant_type: Option<String>,
    #[arg(short, long)]
    sunlight: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long)]
    image: Option<String>,
    /// Watering time to add, as HH:mm (repeatable)
    #[arg(short = 'w', long = "water-at")]
    water_at: Vec<String>,
    /// Watering time to remove, as HH:mm (repeatable)
    #[arg(long = "drop-time")]
    drop_time: Vec<String>,
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W> {
    store: PlantStore,
    plants: PlantListView,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(store: PlantStore, out: W) -> Self {
        let plants = store.list();
        Self { store, plants, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }

    /// Run one input line. Store errors and bad input are reported to the
    /// output and the session continues; only I/O failures are returned.
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let parsed = split_args(line).and_then(|tokens| {
            SessionLine::try_parse_from(tokens).map_err(|e| anyhow::anyhow!(e.render().to_string()))
        });
        let command = match parsed {
            Ok(parsed) => parsed.command,
            Err(e) => {
                writeln!(self.out, "{}", e.to_string().trim_end())?;
                return Ok(Flow::Continue);
            }
        };

        match self.dispatch(command) {
            Ok(flow) => Ok(flow),
            Err(e) => match e.downcast_ref::<StoreError>() {
                Some(store_error) => {
                    writeln!(self.out, "error: {}", store_error)?;
                    Ok(Flow::Continue)
                }
                None => Err(e),
            },
        }
    }

    fn dispatch(&mut self, command: SessionCommand) -> Result<Flow> {
        match command {
            SessionCommand::Add(args) => {
                let mut form = PlantForm::new();
                form.name = args.name;
                form.plant_type = args.plant_type;
                form.sunlight = args.sunlight;
                form.notes = args.notes;
                form.image_uri = args.image;
                for time in &args.water_at {
                    form.add_watering_time(time.parse::<WateringTime>()?);
                }

                let plant = form.save(&self.store)?;
                writeln!(self.out, "Added #{} {}", plant.id, plant.name)?;
            }
            SessionCommand::Edit(args) => {
                let plant = self
                    .store
                    .get(args.id)
                    .ok_or(StoreError::NotFound(args.id))?;
                let mut form = PlantForm::edit(&plant);
                if let Some(name) = args.name {
                    form.name = name;
                }
                if let Some(plant_type) = args.plant_type {
                    form.plant_type = plant_type;
                }
                if let Some(sunlight) = args.sunlight {
                    form.sunlight = sunlight;
                }
                if let Some(notes) = args.notes {
                    form.notes = notes;
                }
                if let Some(image) = args.image {
                    form.image_uri = Some(image);
                }
                for time in &args.drop_time {
                    form.remove_watering_time(time.parse::<WateringTime>()?);
                }
                for time in &args.water_at {
                    form.add_watering_time(time.parse::<WateringTime>()?);
                }

                let plant = form.save(&self.store)?;
                writeln!(self.out, "Updated #{} {}", plant.id, plant.name)?;
            }
            SessionCommand::Water { id } => {
                let plant = self.store.water_plant(id)?;
                writeln!(
                    self.out,
                    "Watered #{} {}, streak {}",
                    plant.id, plant.name, plant.watering_streak
                )?;
            }
            SessionCommand::Remove { id } => {
                let plant = self.store.remove_plant(id)?;
                writeln!(self.out, "Removed #{} {}", plant.id, plant.name)?;
            }
            SessionCommand::List => {
                write!(self.out, "{}", render_list(&self.plants.current()))?;
            }
            SessionCommand::Show { id } => match self.store.get_by_id(id).current() {
                Some(plant) => write!(self.out, "{}", render_detail(&plant))?,
                None => return Err(StoreError::NotFound(id).into()),
            },
            SessionCommand::Categories => {
                let catalog = self.store.catalog();
                writeln!(self.out, "Types: {}", catalog.categories.join(", "))?;
                writeln!(self.out, "Sunlight: {}", catalog.sunlight_options.join(", "))?;
            }
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

/// Split a command line on whitespace, keeping double-quoted runs together.
fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        anyhow::bail!("error: unterminated quote");
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

/// Run a session on stdin/stdout until `quit` or end of input.
pub async fn run_stdio(store: PlantStore) -> Result<()> {
    tracing::info!("Starting plant session");

    let subscription = store.subscribe(|plants| {
        tracing::info!("Plant list changed: {} plants", plants.len());
    });

    let mut session = Session::new(store.clone(), std::io::stdout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    session.prompt()?;
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        if session.execute(&line)? == Flow::Quit {
            break;
        }
        session.prompt()?;
    }

    store.unsubscribe(subscription);
    tracing::info!("Plant session ended with {} plants", store.len());
    Ok(())
}
