//! A full race weekend driven the way a harness would drive it

mod common;

use std::collections::HashMap;

use anyhow::Result;
use common::{dry_race, monza, seated_car, RACE_DATE};
use paddock::observer::{RecordingObserver, SimEvent};
use paddock::random::{SeededRandom, SequenceRandom};
use paddock::types::{Aggressiveness, CarState, RaceState, StatKind, TireCompound, WeatherCondition};
use paddock::{PitStopRequest, Race, SimulationConfig, Strategy, Team};

fn strategy_for(number: u32) -> Result<Strategy> {
    let plan = if number % 2 == 0 {
        Strategy::new(
            Aggressiveness::High,
            vec![15, 30],
            vec![TireCompound::Hard, TireCompound::Hard],
        )?
    } else {
        Strategy::new(
            Aggressiveness::Medium,
            vec![18, 30],
            vec![TireCompound::Medium, TireCompound::Soft],
        )?
    };
    Ok(plan)
}

#[test]
fn strategy_driven_weekend() -> Result<()> {
    let recorder = RecordingObserver::new();
    let mut race =
        dry_race(12, SeededRandom::from_seed(7)).with_observer(Box::new(recorder.clone()));
    let mut strategies: HashMap<u32, Strategy> = HashMap::new();
    for number in 1..=12 {
        let strategy = strategy_for(number)?;
        assert!(strategy.is_optimal());
        strategies.insert(number, strategy);
    }

    let start = race.begin_race()?;
    assert_eq!(start.total_laps, 37);
    assert_eq!(start.grid.len(), 12);
    assert_eq!(race.state(), RaceState::Started);

    while race.current_lap() < race.total_laps() {
        let lap = race.current_lap();
        for (number, strategy) in strategies.iter_mut() {
            if let Some(stop) = strategy.next_stop().filter(|stop| stop.lap == lap) {
                let report =
                    race.pit_stop(*number, PitStopRequest::tires(stop.tire).with_fuel(40.0))?;
                assert_eq!(race.car(*number)?.state(), CarState::InPits);
                strategy.register_stop(report.total_time)?;
            }
        }
        race.advance_lap()?;
    }

    for (number, strategy) in &strategies {
        assert_eq!(strategy.stops_remaining(), 0);
        let car = race.car(*number)?;
        assert_eq!(car.pit_history().len(), 2);
        assert_eq!(car.laps_completed(), 37);
        assert!((strategy.total_pit_time() - 10.6).abs() < 1e-9);
        assert!(car.fuel() >= 0.0 && car.fuel() <= 100.0);
    }

    let classification = race.finish_race()?;
    assert_eq!(race.state(), RaceState::Finished);
    assert_eq!(classification.standings.len(), 12);

    let results = race.results();
    assert_eq!(results.laps_remaining, 0);
    let leader = &results.standings[0].display;
    assert!(leader.starts_with("0:") || leader.starts_with("1:"));

    let events = recorder.events();
    let laps_seen =
        events.iter().filter(|event| matches!(event, SimEvent::LapCompleted { .. })).count();
    assert_eq!(laps_seen, 37);
    assert_eq!(
        events.iter().filter(|event| matches!(event, SimEvent::QualifyingStage { .. })).count(),
        3
    );
    assert!(matches!(events.last(), Some(SimEvent::RaceFinished { winner: Some(_) })));

    let record = race.circuit().lap_record().expect("laps set a circuit record");
    assert_eq!(record.date.to_string(), RACE_DATE);
    Ok(())
}

#[test]
fn team_books_race_outcome() -> Result<()> {
    let mut team = Team::new("Scuderia Paddock", "Italy", 2_000_000);
    team.add_car(seated_car(1));
    team.add_car(seated_car(2));

    let mut race = Race::new("Italian Grand Prix", monza(), RACE_DATE)
        .with_random(SequenceRandom::new(vec![0.2, 0.8, 0.6, 0.4]));
    race.register_car(team.take_car(1)?)?;
    race.register_car(team.take_car(2)?)?;
    for number in 3..=10 {
        race.register_car(seated_car(number))?;
    }
    race.set_weather(WeatherCondition::Damp, 19.0, 65.0)?;

    race.start_race()?;
    let classification = race.finish_race()?;

    let (mut wins, mut podiums) = (0, 0);
    for entry in classification.podium.iter().filter(|entry| entry.car_number <= 2) {
        if entry.position == 1 {
            team.update_stats(StatKind::Win, 1);
            wins += 1;
        } else {
            team.update_stats(StatKind::Podium, 1);
            podiums += 1;
        }
    }
    let stats = team.stats();
    assert_eq!(stats.record.wins, wins);
    assert_eq!(stats.record.podiums, podiums);
    assert_eq!(stats.championship_points, wins * 25 + podiums * 18);
    assert!(team.cars().is_empty());
    Ok(())
}

#[test]
fn yaml_rules_change_the_race() -> Result<()> {
    let config = SimulationConfig::from_yaml(
        "race:\n  min_participants: 4\n  qualifying_cut: 1\n  target_duration_minutes: 10\n\
         lap:\n  mistake_probability: 0.0\nseed: 11\n",
    )?;

    let mut race = Race::new("Sprint", monza(), RACE_DATE).with_config(config)?;
    for number in 1..=4 {
        race.register_car(seated_car(number))?;
    }
    race.set_weather(WeatherCondition::Dry, 30.0, 40.0)?;
    assert!(race.is_valid());

    let qualifying = race.run_qualifying()?;
    assert_eq!(qualifying.q1.eliminated.len(), 1);
    assert_eq!(qualifying.q2.eliminated.len(), 1);
    assert_eq!(qualifying.q3.times.len(), 2);

    let summary = race.start_race()?;
    // 10 minutes at 264 km/h on 5.793 km
    assert_eq!(summary.total_laps, 7);
    race.finish_race()?;

    let mistakes: u32 = race
        .participants()
        .iter()
        .filter_map(|car| car.driver())
        .map(|driver| driver.performance().mistakes)
        .sum();
    assert_eq!(mistakes, 0);
    Ok(())
}

#[test]
fn rain_race_runs_to_completion() -> Result<()> {
    let mut race = dry_race(10, SeededRandom::from_seed(99));
    race.set_weather(WeatherCondition::Rain, 14.0, 90.0)?;
    let summary = race.start_race()?;
    assert_eq!(summary.weather.condition, WeatherCondition::Rain);
    assert!(summary.fastest_lap.is_some());

    let classification = race.finish_race()?;
    let awarded: u32 = classification.points.iter().map(|award| award.points).sum();
    assert_eq!(awarded, 59);
    Ok(())
}
