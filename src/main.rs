use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;
use mjour::application::{
    init, AnalyticsService, ConfigService, JournalService, PinService, StreakService, TagService,
};
use mjour::cli::{output, Cli, Commands, PinCommand, StatsCommand, TagsCommand};
use mjour::domain::tag::DEFAULT_TAG_COLOR;
use mjour::domain::{parse_day, Entry, Mood};
use mjour::error::{MjourError, Result};
use mjour::infrastructure::{
    Config, EditorSession, EntryFilter, FileSystemRepository, JournalRepository, JournalStore,
    SqliteStore,
};
use std::str::FromStr;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// An opened journal plus the clock reading for this invocation
struct Session {
    repo: FileSystemRepository,
    config: Config,
    store: SqliteStore,
    now: NaiveDateTime,
}

impl Session {
    fn today(&self) -> NaiveDate {
        self.now.date()
    }
}

fn run(cli: Cli) -> Result<()> {
    let now = Local::now().naive_local();

    match cli.command {
        Commands::Init { path } => init::init(&path, now),
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(FileSystemRepository::discover()?);

            if list {
                for (key, value) in service.list()? {
                    println!("{} = {}", key, value);
                }
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: mjour config [--list | <key> [<value>]]");
                println!("Valid keys: {}", Config::KEYS.join(", "));
            }
            Ok(())
        }
        command => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let store = repo.open_store()?;
            TagService::new(&store).seed_prebuilt(now)?;

            let session = Session {
                repo,
                config,
                store,
                now,
            };
            unlock(&session, &command, cli.pin.as_deref())?;
            execute(&session, command)
        }
    }
}

/// Refuse to touch a locked journal without the right PIN
fn unlock(session: &Session, command: &Commands, pin: Option<&str>) -> Result<()> {
    if let Commands::Pin {
        command: PinCommand::Status | PinCommand::Check { .. },
    } = command
    {
        return Ok(());
    }

    let pins = PinService::new(&session.store);
    if !pins.is_enabled()? {
        return Ok(());
    }
    match pin {
        Some(pin) => pins.require_pin(pin),
        None => Err(MjourError::Auth("This journal is locked".to_string())),
    }
}

fn execute(session: &Session, command: Commands) -> Result<()> {
    let store = &session.store;
    let today = session.today();

    match command {
        Commands::Init { .. } | Commands::Config { .. } => Ok(()),
        Commands::Write {
            date,
            title,
            mood,
            also,
            tags,
            favorite,
            content,
        } => {
            let date = if date.is_empty() {
                today
            } else {
                parse_day(&date.join(" "), today)?
            };
            if date > today {
                return Err(MjourError::Validation(format!(
                    "Cannot write an entry for a future date ({})",
                    date.format("%d-%m-%Y")
                )));
            }

            let journal = JournalService::new(store);
            let mut entry = match journal.get_entry_by_date(date)? {
                Some(existing) => existing,
                None => Entry::new(date, date.format("%A, %d %B %Y").to_string(), "")
                    .with_mood(session.config.default_mood),
            };

            if let Some(title) = title {
                entry.title = title;
            }
            if let Some(mood) = mood {
                entry.primary_mood = parse_mood(&mood)?;
            }
            if !also.is_empty() {
                if also.len() > 2 {
                    return Err(MjourError::Validation(
                        "At most two secondary moods are allowed".to_string(),
                    ));
                }
                let moods = also
                    .iter()
                    .map(|m| parse_mood(m))
                    .collect::<Result<Vec<_>>>()?;
                entry = entry.with_secondary_moods(&moods);
            }
            if !tags.is_empty() {
                entry.tags = TagService::new(store).resolve_names(&tags)?;
            }
            if favorite {
                entry.is_favorite = true;
            }
            entry.content = match content {
                Some(text) => text,
                None => {
                    let editor = EditorSession::new(session.config.get_editor());
                    editor.edit(&session.repo.draft_path(), &entry.content)?
                }
            };

            let saved = journal.save(entry, session.now)?;
            println!(
                "Saved entry #{} for {} ({} words)",
                saved.id,
                saved.entry_date.format("%d-%m-%Y"),
                saved.word_count
            );
            Ok(())
        }
        Commands::Show { target } => {
            let entry = find_entry(store, &target, today)?;
            print!("{}", output::format_entry(&entry));
            Ok(())
        }
        Commands::List {
            page,
            page_size,
            search,
        } => {
            let page_size = page_size.unwrap_or(session.config.entries_per_page);
            let page = JournalService::new(store).paginate(page, page_size, search.as_deref())?;
            print!("{}", output::format_page(&page));
            Ok(())
        }
        Commands::Search { term } => {
            let found = JournalService::new(store).search(&term)?;
            print!("{}", output::format_search_results(&found));
            Ok(())
        }
        Commands::Filter {
            mood,
            tag,
            from,
            to,
        } => {
            let tag_id = match tag {
                Some(name) => Some(
                    TagService::new(store)
                        .resolve_names([name])?
                        .remove(0)
                        .id,
                ),
                None => None,
            };
            let filter = EntryFilter {
                from: from.map(|d| parse_day(&d, today)).transpose()?,
                to: to.map(|d| parse_day(&d, today)).transpose()?,
                mood: mood.map(|m| parse_mood(&m)).transpose()?,
                tag_id,
            };
            let entries = JournalService::new(store).filter(&filter)?;
            print!("{}", output::format_entry_list(&entries));
            Ok(())
        }
        Commands::Delete { target } => {
            let entry = find_entry(store, &target, today)?;
            JournalService::new(store).delete(entry.id, today)?;
            println!(
                "Deleted entry #{} for {}",
                entry.id,
                entry.entry_date.format("%d-%m-%Y")
            );
            Ok(())
        }
        Commands::Calendar { year, month } => {
            let dates = JournalService::new(store).dates_with_entries(year, month)?;
            print!("{}", output::format_calendar(year, month, &dates));
            Ok(())
        }
        Commands::Streak => {
            // Days may have passed since the last write
            let info = StreakService::new(store).recompute(today)?;
            print!("{}", output::format_streak(&info));
            Ok(())
        }
        Commands::Missed { days } => {
            let days = days.unwrap_or(session.config.missed_days_window);
            let missed = StreakService::new(store).missed_days(today, days)?;
            print!("{}", output::format_missed(&missed));
            Ok(())
        }
        Commands::Stats { command } => stats(session, command),
        Commands::Tags { command } => tags(session, command),
        Commands::Pin { command } => pin(session, command),
    }
}

fn stats(session: &Session, command: StatsCommand) -> Result<()> {
    let analytics = AnalyticsService::new(&session.store);
    let today = session.today();

    let text = match command {
        StatsCommand::Moods { from, to } => {
            let from = from.map(|d| parse_day(&d, today)).transpose()?;
            let to = to.map(|d| parse_day(&d, today)).transpose()?;
            output::format_mood_distribution(&analytics.mood_distribution(from, to)?)
        }
        StatsCommand::Tags { top } => {
            let top = top.unwrap_or(session.config.top_tags);
            output::format_tag_usage(&analytics.tag_usage(top)?)
        }
        StatsCommand::Trend { days } => {
            let days = days.unwrap_or(session.config.trend_days);
            output::format_trend(&analytics.word_count_trend(today, days)?)
        }
        StatsCommand::Monthly { months } => {
            let months = months.unwrap_or(session.config.monthly_months);
            output::format_monthly(&analytics.monthly_stats(today, months)?)
        }
        StatsCommand::Summary => output::format_summary(&analytics.summary()?),
    };
    print!("{}", text);
    Ok(())
}

fn tags(session: &Session, command: TagsCommand) -> Result<()> {
    let service = TagService::new(&session.store);

    match command {
        TagsCommand::List { custom, prebuilt } => {
            let tags = if custom {
                service.custom_tags()?
            } else if prebuilt {
                service.prebuilt_tags()?
            } else {
                service.all_tags()?
            };
            print!("{}", output::format_tag_list(&tags));
        }
        TagsCommand::Add { name, color } => {
            let color = color.as_deref().unwrap_or(DEFAULT_TAG_COLOR);
            let tag = service.create(&name, color, session.now)?;
            println!("Created tag #{} ({}) with id {}", tag.name, tag.color, tag.id);
        }
        TagsCommand::Edit { id, name, color } => {
            let tag = service.update(id, name.as_deref(), color.as_deref())?;
            println!("Updated tag {}: #{} ({})", tag.id, tag.name, tag.color);
        }
        TagsCommand::Remove { id } => {
            if service.delete(id)? {
                println!("Deleted tag {}", id);
            } else {
                return Err(MjourError::TagNotFound(id));
            }
        }
    }
    Ok(())
}

fn pin(session: &Session, command: PinCommand) -> Result<()> {
    let pins = PinService::new(&session.store);

    match command {
        PinCommand::Set { new_pin } => {
            pins.set_pin(&new_pin)?;
            println!("PIN set");
        }
        PinCommand::Check { candidate } => {
            pins.require_pin(&candidate)?;
            println!("PIN accepted");
        }
        PinCommand::Remove => {
            pins.remove_pin()?;
            println!("PIN removed");
        }
        PinCommand::Status => {
            if pins.is_enabled()? {
                println!("PIN lock: enabled");
            } else {
                println!("PIN lock: disabled");
            }
        }
    }
    Ok(())
}

fn parse_mood(input: &str) -> Result<Mood> {
    Mood::from_str(input).map_err(MjourError::Validation)
}

/// Resolve `#ID` or a day reference to a stored entry
fn find_entry<S: JournalStore>(store: &S, target: &[String], today: NaiveDate) -> Result<Entry> {
    let target = target.join(" ");
    let journal = JournalService::new(store);

    if let Some(id) = target.trim().strip_prefix('#') {
        let id: i64 = id.parse().map_err(|_| {
            MjourError::Validation(format!("Invalid entry id: '{}'", target.trim()))
        })?;
        return journal.get_entry(id)?.ok_or(MjourError::EntryNotFound(id));
    }

    let date = parse_day(&target, today)?;
    journal
        .get_entry_by_date(date)?
        .ok_or(MjourError::NoEntryForDate(date))
}
