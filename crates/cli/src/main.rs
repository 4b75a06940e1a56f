use anyhow::Context;
use chainhand_autoplay::{run_autoplay, AutoplayConfig, Simulator};
use chainhand_core::{
    EventBus, GameConfig, MagicChoice, Phase, RngState, RunError, RunState, ShopError,
};
use chainhand_data::load_game_config;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "CHAINHAND_LOG";

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    seed: Option<u64>,
    config_dir: Option<PathBuf>,
    auto: bool,
    json: bool,
}

fn parse_cli_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--auto" => options.auto = true,
            "--json" => options.json = true,
            "--seed" => {
                let value = args.get(idx + 1).context("--seed needs a value")?;
                let seed = value
                    .parse::<u64>()
                    .with_context(|| format!("invalid seed '{value}'"))?;
                options.seed = Some(seed);
                idx += 1;
            }
            "--config" => {
                let value = args.get(idx + 1).context("--config needs a directory")?;
                options.config_dir = Some(PathBuf::from(value));
                idx += 1;
            }
            other => anyhow::bail!("unknown argument '{other}'"),
        }
        idx += 1;
    }
    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args)?;
    let config = match options.config_dir.as_deref() {
        Some(dir) => load_game_config(dir)?,
        None => GameConfig::default(),
    };
    let seed = options
        .seed
        .unwrap_or_else(|| RngState::from_entropy().seed());
    tracing::info!(seed, auto = options.auto, "starting");
    if options.auto {
        return run_auto(config, seed, options.json);
    }
    run_repl(config, seed, options.json)
}

fn run_auto(config: GameConfig, seed: u64, json: bool) -> anyhow::Result<()> {
    let auto = AutoplayConfig {
        seed,
        ..AutoplayConfig::default()
    };
    let sim = Simulator::from_config(config, &auto);
    let result = run_autoplay(sim.run, &auto)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.to_text_report());
    }
    Ok(())
}

fn run_repl(config: GameConfig, seed: u64, json: bool) -> anyhow::Result<()> {
    let mut events = EventBus::default();
    let mut run = RunState::new(config, seed, &mut events);
    drain_events(&mut events);
    print_help();
    print_state(&run, json)?;
    print_hand(&run);
    print_next_step(&run);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}> ", run.state.phase.label().to_ascii_lowercase());
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read command")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        let result = match cmd {
            "help" | "?" => {
                print_help();
                Ok(())
            }
            "quit" | "q" | "exit" => break,
            "hand" | "h" => {
                print_hand(&run);
                Ok(())
            }
            "state" | "s" => {
                print_state(&run, json)?;
                Ok(())
            }
            "log" => {
                for line in run.log.lines() {
                    println!("  {line}");
                }
                Ok(())
            }
            "shop" => {
                print_shop(&run);
                Ok(())
            }
            "play" | "p" => match parse_indices_result(&args, run.hand.len()) {
                Ok(indices) => run.play_hand(&indices, &mut events).map(|outcome| {
                    println!(
                        "{}: {} x{:.2} chain x{} card = {:.1} pts",
                        outcome.hand,
                        outcome.breakdown.subtotal(),
                        outcome.chain_mult,
                        outcome.breakdown.card_mult,
                        outcome.points
                    );
                }),
                Err(err) => {
                    println!("error: {err}");
                    continue;
                }
            },
            "pass" => run.pass(&mut events).map(|_| ()),
            "redraw" | "r" => run.redraw(&mut events).map(|_| ()),
            "buy" => {
                let Some(item) = args.first() else {
                    println!("usage: buy <item id or slot>");
                    continue;
                };
                run.buy_upgrade(item, &mut events).map(|_| ())
            }
            "continue" | "c" => run.continue_from_shop(&mut events),
            "magic" | "m" => {
                let Some(choice) = args.first() else {
                    print_magic(&run);
                    continue;
                };
                let target = match args.get(1).map(|value| value.parse::<usize>()) {
                    None => None,
                    Some(Ok(idx)) => Some(idx),
                    Some(Err(_)) => {
                        println!("error: invalid card index '{}'", args[1]);
                        continue;
                    }
                };
                run.choose_magic_by_id(choice, target, &mut events)
            }
            "restart" => {
                run.restart(&mut events);
                Ok(())
            }
            _ => {
                println!("unknown command '{cmd}', type help");
                continue;
            }
        };
        drain_events(&mut events);
        if let Err(err) = result {
            print_run_error(&run, &err);
        }
        print_next_step(&run);
    }
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  hand | h                 show the hand with indices");
    println!("  state | s                show level, score, gold and piles");
    println!("  play | p <idx,..|a-b>    play 1, 2 or 5 cards");
    println!("  pass                     draw back up to the hand size");
    println!("  redraw | r               swap the hand for random discards (once)");
    println!("  shop                     list upgrades");
    println!("  buy <item>               buy an upgrade by id or slot");
    println!("  continue | c             leave the shop");
    println!("  magic | m <choice> [idx] pick a magic upgrade");
    println!("  log                      show recent messages");
    println!("  restart                  start over with a new seed");
    println!("  help | ?                 show this list");
    println!("  quit | q                 leave");
}

fn print_state(run: &RunState, json: bool) -> anyhow::Result<()> {
    let snapshot = run.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }
    println!(
        "== Level {}/{} == {} | score {:.1}/{} | gold {:.1}",
        snapshot.level,
        snapshot.max_level,
        snapshot.phase,
        snapshot.score,
        snapshot.target,
        snapshot.gold
    );
    println!(
        "deck {} | hand {} | discard {} | seed {}",
        snapshot.deck_size, snapshot.hand_size, snapshot.discard_size, snapshot.seed
    );
    match snapshot.chain_last {
        Some(kind) => println!(
            "chain: {kind} #{} (x{:.2})",
            snapshot.chain_count, snapshot.chain_mult
        ),
        None => println!("chain: none"),
    }
    if !snapshot.modifiers.bonuses.is_empty() {
        let bonuses = snapshot
            .modifiers
            .bonuses
            .iter()
            .map(|(kind, value)| format!("{kind} +{value}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("bonuses: {bonuses}");
    }
    if let Some(multiplier) = snapshot.modifiers.card_multiplier {
        println!(
            "card multiplier: {} x{}",
            multiplier.rank.label(),
            multiplier.factor
        );
    }
    if snapshot.modifiers.draw_boost_available {
        println!("draw boost ready");
    }
    if snapshot.modifiers.redraw_available {
        println!("redraw ready");
    }
    Ok(())
}

fn print_hand(run: &RunState) {
    println!("== Hand == ({} cards)", run.hand.len());
    for (idx, card) in run.hand.iter().enumerate() {
        println!("{idx:>4}  {card}");
    }
}

fn print_shop(run: &RunState) {
    if run.state.phase != Phase::Shop {
        println!("the shop opens after a level is cleared");
        return;
    }
    println!("== Shop == (gold {:.1})", run.state.gold);
    for (slot, listing) in run.shop_listings().iter().enumerate() {
        println!(
            "{:>4}  {:<22} +{:<4} {:<16} {:>5} gold{}",
            slot + 1,
            listing.id,
            listing.bonus,
            listing.kind.to_string(),
            listing.cost,
            if listing.affordable { "" } else { "  (too expensive)" }
        );
    }
}

fn print_magic(run: &RunState) {
    println!("== Magic ==");
    for (slot, choice) in MagicChoice::ALL.iter().enumerate() {
        let target = if choice.needs_target() { " <idx>" } else { "" };
        println!(
            "{:>4}  {:<16} {}{}",
            slot + 1,
            choice.id(),
            choice.display_name(),
            target
        );
    }
    if run.hand.is_empty() {
        println!("hand is empty: targeted choices are unavailable");
    }
}

fn drain_events(events: &mut EventBus) {
    for event in events.drain() {
        println!("event: {event}");
    }
}

fn print_run_error(run: &RunState, err: &RunError) {
    println!("error: {err}");
    let hint = match err {
        RunError::InvalidSelection => format!(
            "use distinct indices between 0 and {}",
            run.hand.len().saturating_sub(1)
        ),
        RunError::InvalidCombination => {
            "valid plays: a single, a pair, or a 5-card straight/flush/full house/quads".to_string()
        }
        RunError::Shop(ShopError::UnknownItem(_)) => "type shop to list item ids".to_string(),
        RunError::Shop(ShopError::InsufficientFunds { .. }) => {
            "continue to skip the shop".to_string()
        }
        RunError::UnknownMagic(_) | RunError::MissingTarget(_) => {
            "type magic to list choices".to_string()
        }
        RunError::RunOver(_) => "restart to play again".to_string(),
        _ => return,
    };
    println!("hint: {hint}");
}

fn print_next_step(run: &RunState) {
    match run.state.phase {
        Phase::InProgress => {
            let sim = Simulator::new(run.clone());
            let suggestion = sim
                .greedy_action(&AutoplayConfig::default())
                .and_then(|action| sim.describe_action(&action));
            match suggestion {
                Some(text) => println!("next: {text}"),
                None => println!("next: play cards or pass"),
            }
        }
        Phase::Shop => println!("next: buy <item> or continue"),
        Phase::MagicChoice => println!("next: magic <choice> [idx] (type magic to list)"),
        Phase::Failed => println!("next: restart or quit"),
        Phase::Completed => println!("next: all levels cleared; restart or quit"),
    }
}

/// Ranges must stay inside the hand; single indices are left to the run to
/// reject.
fn parse_indices_result(args: &[&str], hand_len: usize) -> Result<Vec<usize>, String> {
    if args.is_empty() {
        return Err("missing indices".to_string());
    }
    let mut indices = Vec::new();
    for arg in args {
        for part in arg.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if let Some((start, end)) = part.split_once('-') {
                let start = start
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| "invalid range start".to_string())?;
                let end = end
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| "invalid range end".to_string())?;
                if start > end {
                    return Err("range start larger than end".to_string());
                }
                if end >= hand_len {
                    return Err(format!("range end {end} is past the last card"));
                }
                indices.extend(start..=end);
            } else {
                let idx = part
                    .parse::<usize>()
                    .map_err(|_| format!("invalid index '{part}'"))?;
                indices.push(idx);
            }
        }
    }
    if indices.is_empty() {
        return Err("missing indices".to_string());
    }
    Ok(indices)
}
