use anyhow::{Result, bail, ensure};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hasher;
use twox_hash::XxHash64;

use super::{ScenarioCtx, TestScenario};
use crate::common::util::{displayed_ids, select_exactly};
use royal_core::{ReplaceOutcome, SelectionSession};

const UNKNOWN_ID: &str = "not-a-catalog-map";
const UNIFORMITY_DRAWS_PER_MAP: usize = 200;

pub fn catalog_scenarios() -> Vec<TestScenario> {
    vec![
        TestScenario::new(
            "smoke",
            "Smoke",
            "Load the dataset, reroll once, check the status summary",
            smoke,
        ),
        TestScenario::new(
            "filter-inclusivity",
            "Filter Inclusivity",
            "A random year subset keeps exactly the maps with an event in it",
            filter_inclusivity,
        ),
        TestScenario::new(
            "empty-filter",
            "Empty Filter",
            "No checked year means the whole catalog, in order",
            empty_filter,
        ),
        TestScenario::new(
            "draw-bounds",
            "Draw Bounds",
            "Draws return min(count, pool) maps, never excluded ones",
            draw_bounds,
        ),
        TestScenario::new(
            "replace-positions",
            "Replace Positions",
            "Replacing a map keeps every other slot in place",
            replace_positions,
        ),
        TestScenario::new(
            "toggle-roundtrip",
            "Toggle Roundtrip",
            "Toggling a year twice restores the filter and never redraws",
            toggle_roundtrip,
        ),
        TestScenario::new(
            "pool-exhaustion",
            "Pool Exhaustion",
            "Replacing with nothing left to draw is a silent no-op",
            pool_exhaustion,
        ),
        TestScenario::new(
            "deterministic-draws",
            "Deterministic Draws",
            "The same seed and actions replay the same selections",
            deterministic_draws,
        ),
        TestScenario::new(
            "shuffle-uniformity",
            "Shuffle Uniformity",
            "Every eligible map leads a reroll about equally often",
            shuffle_uniformity,
        ),
    ]
}

/// Scenario-side randomness, kept apart from the session's own stream.
fn fixture_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed.rotate_left(32) ^ 0x5EED_0FF1_C7E5)
}

fn random_years(rng: &mut ChaCha20Rng, available: &[String]) -> BTreeSet<String> {
    let mut picked: BTreeSet<String> = available
        .iter()
        .filter(|_| rng.gen_bool(0.5))
        .cloned()
        .collect();
    if picked.is_empty()
        && let Some(year) = available.choose(rng)
    {
        picked.insert(year.clone());
    }
    picked
}

fn ensure_unique(ids: &[String]) -> Result<()> {
    let unique: HashSet<&String> = ids.iter().collect();
    ensure!(unique.len() == ids.len(), "duplicate maps displayed: {ids:?}");
    Ok(())
}

fn smoke(ctx: &ScenarioCtx, seed: u64) -> Result<()> {
    let mut session = ctx.session(seed);
    ensure!(
        session.displayed_len() == 0,
        "new session already shows maps"
    );
    let drawn = session.reroll_all();
    let expected = session.target_count().min(session.filtered_count());
    ensure!(drawn == expected, "drew {drawn} maps, expected {expected}");
    ensure_unique(&displayed_ids(&session))?;

    let status = session.status();
    ensure!(
        status.shown == drawn && status.available == session.filtered_count(),
        "status {status:?} disagrees with the session"
    );
    if ctx.verbose {
        println!("     {status}");
    }
    Ok(())
}

fn filter_inclusivity(ctx: &ScenarioCtx, seed: u64) -> Result<()> {
    let mut session = ctx.session(seed);
    let mut rng = fixture_rng(seed);
    let wanted = random_years(&mut rng, session.filter().available_years());
    select_exactly(&mut session, &wanted);

    let zone = session.zone();
    let expected: Vec<&str> = session
        .catalog()
        .iter()
        .filter(|m| m.event_years(zone).any(|y| wanted.contains(&y.to_string())))
        .map(|m| m.id.as_str())
        .collect();
    let actual: Vec<&str> = session
        .filtered_catalog()
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    ensure!(
        actual == expected,
        "years {wanted:?}: filtered {actual:?}, expected {expected:?}"
    );
    Ok(())
}

fn empty_filter(ctx: &ScenarioCtx, seed: u64) -> Result<()> {
    let mut session = ctx.session(seed);
    select_exactly(&mut session, &BTreeSet::new());
    ensure!(session.filter().is_unfiltered(), "selection is not empty");

    let all: Vec<&str> = session.catalog().iter().map(|m| m.id.as_str()).collect();
    let filtered: Vec<&str> = session
        .filtered_catalog()
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    ensure!(filtered == all, "empty filter dropped or reordered maps");

    let drawn = session.reroll_all();
    let expected = session.target_count().min(session.catalog().len());
    ensure!(drawn == expected, "drew {drawn} maps, expected {expected}");
    Ok(())
}

fn draw_bounds(ctx: &ScenarioCtx, seed: u64) -> Result<()> {
    let mut session = ctx.session(seed);
    let mut rng = fixture_rng(seed);
    let wanted = if rng.gen_bool(0.25) {
        BTreeSet::new()
    } else {
        random_years(&mut rng, session.filter().available_years())
    };
    select_exactly(&mut session, &wanted);

    let pool: Vec<String> = session
        .filtered_catalog()
        .iter()
        .map(|m| m.id.clone())
        .collect();
    let exclude: HashSet<String> = pool
        .iter()
        .filter(|_| rng.gen_bool(0.3))
        .cloned()
        .collect();
    let count = rng.gen_range(0..=pool.len() + 2);
    let remaining = pool.len() - exclude.len();

    let drawn: Vec<String> = session
        .draw_random(count, &exclude)
        .into_iter()
        .map(|m| m.id.clone())
        .collect();
    ensure!(
        drawn.len() == count.min(remaining),
        "asked for {count} of {remaining}, got {}",
        drawn.len()
    );
    ensure_unique(&drawn)?;
    for id in &drawn {
        ensure!(!exclude.contains(id), "drew excluded map {id}");
        ensure!(pool.contains(id), "drew {id} from outside the filter");
    }
    Ok(())
}

fn replace_positions(ctx: &ScenarioCtx, seed: u64) -> Result<()> {
    let mut session = ctx.session(seed);
    let mut rng = fixture_rng(seed);
    session.reroll_all();

    let mut order = displayed_ids(&session);
    order.shuffle(&mut rng);
    for id in order {
        let before = displayed_ids(&session);
        let outcome = session.replace_one(&id);
        let after = displayed_ids(&session);
        match outcome {
            ReplaceOutcome::Replaced {
                index,
                previous,
                replacement,
            } => {
                ensure!(previous == id, "replaced {previous}, asked for {id}");
                ensure!(before[index] == id, "slot {index} did not hold {id}");
                ensure!(after[index] == replacement, "slot {index} not updated");
                ensure!(
                    !before.contains(&replacement),
                    "replacement {replacement} was already displayed"
                );
                for (pos, (old, new)) in before.iter().zip(&after).enumerate() {
                    ensure!(pos == index || old == new, "slot {pos} moved");
                }
            }
            ReplaceOutcome::PoolExhausted => {
                ensure!(before == after, "exhausted replace changed the list");
            }
            ReplaceOutcome::NotDisplayed => bail!("{id} was displayed but reported missing"),
        }
        ensure_unique(&after)?;
    }
    Ok(())
}

fn toggle_roundtrip(ctx: &ScenarioCtx, seed: u64) -> Result<()> {
    let mut session = ctx.session(seed);
    session.reroll_all();
    let shown = displayed_ids(&session);
    let selected: Vec<String> = session
        .filter()
        .selected_years()
        .into_iter()
        .map(ToString::to_string)
        .collect();

    for year in session.filter().available_years().to_vec() {
        let first = session.toggle_year(&year);
        ensure!(
            displayed_ids(&session) == shown,
            "toggling {year} redrew the list"
        );
        let second = session.toggle_year(&year);
        ensure!(
            first.is_some() && second.is_some() && first != second,
            "toggle of {year} reported {first:?} then {second:?}"
        );
    }
    ensure!(
        session.toggle_year("1899").is_none(),
        "unknown year was accepted"
    );
    let after: Vec<&str> = session.filter().selected_years();
    ensure!(after == selected, "selection drifted to {after:?}");
    ensure!(displayed_ids(&session) == shown, "toggles redrew the list");
    Ok(())
}

fn pool_exhaustion(ctx: &ScenarioCtx, seed: u64) -> Result<()> {
    let mut session = ctx.session(seed);
    let years = session.filter().available_years().to_vec();

    let mut smallest: Option<(String, usize)> = None;
    for year in &years {
        select_exactly(&mut session, &BTreeSet::from([year.clone()]));
        let pool = session.filtered_count();
        if pool > 0 && smallest.as_ref().is_none_or(|(_, best)| pool < *best) {
            smallest = Some((year.clone(), pool));
        }
    }

    let Some((year, pool)) = smallest else {
        ensure!(session.reroll_all() == 0, "drew maps from empty years");
        return Ok(());
    };
    select_exactly(&mut session, &BTreeSet::from([year.clone()]));
    session.reroll_all();
    let before = displayed_ids(&session);
    ensure!(
        before.len() == pool.min(session.target_count()),
        "{year}: showing {} of a {pool}-map pool",
        before.len()
    );

    if pool <= session.target_count() {
        for id in &before {
            let outcome = session.replace_one(id);
            ensure!(
                outcome == ReplaceOutcome::PoolExhausted,
                "{year}: replacing {id} gave {outcome:?}"
            );
        }
        ensure!(displayed_ids(&session) == before, "exhausted pool changed the list");
    } else if let Some(first) = before.first() {
        let outcome = session.replace_one(first);
        ensure!(
            matches!(outcome, ReplaceOutcome::Replaced { .. }),
            "{year}: replacement available but got {outcome:?}"
        );
    }

    let shown = displayed_ids(&session);
    let outcome = session.replace_one(UNKNOWN_ID);
    ensure!(
        outcome == ReplaceOutcome::NotDisplayed,
        "unknown id gave {outcome:?}"
    );
    ensure!(displayed_ids(&session) == shown, "unknown id changed the list");
    Ok(())
}

fn script_digest(ctx: &ScenarioCtx, seed: u64) -> u64 {
    let mut session: SelectionSession = ctx.session(seed);
    let mut rng = fixture_rng(seed);
    let mut hasher = XxHash64::with_seed(seed);
    for _ in 0..16 {
        match rng.gen_range(0..3) {
            0 => {
                session.reroll_all();
            }
            1 => {
                let target = session
                    .displayed_ids()
                    .choose(&mut rng)
                    .map(ToString::to_string);
                if let Some(id) = target {
                    session.replace_one(&id);
                }
            }
            _ => {
                let year = session.filter().available_years().choose(&mut rng).cloned();
                if let Some(year) = year {
                    session.toggle_year(&year);
                }
            }
        }
        for id in session.displayed_ids() {
            hasher.write(id.as_bytes());
        }
        hasher.write_u8(0xFF);
    }
    hasher.finish()
}

fn deterministic_draws(ctx: &ScenarioCtx, seed: u64) -> Result<()> {
    let first = script_digest(ctx, seed);
    let second = script_digest(ctx, seed);
    ensure!(
        first == second,
        "seed {seed} replayed to {first:016x} then {second:016x}"
    );
    Ok(())
}

fn shuffle_uniformity(ctx: &ScenarioCtx, seed: u64) -> Result<()> {
    let mut session = ctx.session(seed);
    let pool = session.filtered_count();
    if pool < 2 {
        return Ok(());
    }
    let trials = pool * UNIFORMITY_DRAWS_PER_MAP;
    let mut leads: HashMap<String, usize> = HashMap::new();
    for _ in 0..trials {
        session.reroll_all();
        if let Some(first) = session.displayed_ids().first() {
            *leads.entry((*first).to_string()).or_default() += 1;
        }
    }
    ensure!(
        leads.len() == pool,
        "only {} of {pool} maps ever led a reroll",
        leads.len()
    );
    let low = UNIFORMITY_DRAWS_PER_MAP * 6 / 10;
    let high = UNIFORMITY_DRAWS_PER_MAP * 14 / 10;
    for (id, count) in &leads {
        ensure!(
            (low..=high).contains(count),
            "{id} led {count} of {trials} rerolls (expected {low}..={high})"
        );
    }
    Ok(())
}
