use analyzer::{LeagueContext, reconcile};
use configuration::Settings;
use exporter::{ConsoleReport, SeasonSummary};
use rust_decimal_macros::dec;
use serde_json::{Value, json};

const TRADES: &str = "\
manager,trade_date,added_players,dropped_players,added_value_then,added_value_now,dropped_value_then,dropped_value_now
PTexas,2025-09-20,\"Puka Nacua, 2026 Round 2\",Davante Adams,5000,7000,4000,3000
elite,2025-09-20,Davante Adams,\"Puka Nacua, 2026 Round 2\",4000,3000,5000,7000
Dzel45,2025-10-02,Jaxon Smith-Njigba,nan,2500,6100,,
Mellow,2025-10-02,N/A,Jaxon Smith-Njigba,,,2500,6100
";

const TEAMS: &str = "\
manager,wins,made_playoffs,trade_count,total_trade_value_gained,avg_trade_performance,total_change,gmoty_score
PTexas,9,True,1,4000,4000,-38000,420
Dzel45,8,True,1,6100,6100,12000,380
MaliciousKid,8,True,0,0,,1000,360
Gronk,7,True,0,0,,-2000,330
Bijan,7,True,0,0,,5000,310
SaquonU,6,True,0,0,,-7000,290
elite,6,False,1,-4000,-4000,-53000,150
Mellow,5,False,1,-6100,-6100,3000,130
";

const EMPTY_TRADES: &str = "\
manager,trade_date,added_players,dropped_players,added_value_then,added_value_now,dropped_value_then,dropped_value_now
";

fn context(trades: &str, teams: &str) -> LeagueContext {
    let trades = ledger::trades_from_reader(trades.as_bytes()).unwrap();
    let teams = ledger::teams_from_reader(teams.as_bytes()).unwrap();
    LeagueContext::build(&trades, teams).unwrap()
}

fn export(ctx: &LeagueContext, settings: &Settings) -> String {
    SeasonSummary::build(ctx, settings)
        .unwrap()
        .to_json_string()
        .unwrap()
}

#[test]
fn csv_to_json_summary() {
    let ctx = context(TRADES, TEAMS);
    let mut settings = Settings::default();
    settings.report.season = "2025".to_string();
    settings.league.waiver_claims = Some(204);
    settings.league.fa_pickups = Some(274);

    let value: Value = serde_json::from_str(&export(&ctx, &settings)).unwrap();

    assert_eq!(value["winner"]["manager"], "PTexas");
    assert_eq!(value["winner"]["score"], 420);

    let rankings = value["rankings"].as_array().unwrap();
    assert_eq!(rankings.len(), 6);
    assert_eq!(
        rankings[5],
        json!({"rank": 6, "manager": "SaquonU", "value_change": -7000, "wins": 6, "trades": 0})
    );

    assert_eq!(
        value["best_trade"],
        json!({
            "manager": "Dzel45",
            "acquired": "Jaxon Smith-Njigba",
            "sent": "N/A",
            "value_gain": 6100
        })
    );
    assert_eq!(value["worst_trade"]["manager"], "Mellow");
    assert_eq!(value["worst_trade"]["acquired"], "N/A");
    assert_eq!(value["worst_trade"]["value_loss"], -6100);
    assert_eq!(
        value["fleece_award"],
        json!({"manager": "Dzel45", "acquired": "Jaxon Smith-Njigba", "appreciation": 3600})
    );

    let stats = &value["league_stats"];
    assert_eq!(stats["total_trades"], 2);
    assert_eq!(stats["waiver_claims"], 204);
    assert_eq!(stats["fa_pickups"], 274);
    assert_eq!(stats["net_value"], -79000);
    assert_eq!(stats["most_active"], "PTexas");
    assert_eq!(stats["most_active_count"], 1);
    assert_eq!(
        stats["most_active_all"],
        json!(["PTexas", "Dzel45", "elite", "Mellow"])
    );

    let trade_rankings = value["trade_rankings"].as_array().unwrap();
    assert_eq!(trade_rankings.len(), 4);
    assert_eq!(trade_rankings[0]["manager"], "Dzel45");
    assert_eq!(trade_rankings[3]["manager"], "Mellow");
}

#[test]
fn rerunning_is_byte_identical() {
    let settings = Settings::default();
    let first = export(&context(TRADES, TEAMS), &settings);
    let second = export(&context(TRADES, TEAMS), &settings);
    assert_eq!(first, second);

    let report = |ctx: &LeagueContext| ConsoleReport::new(ctx, &settings).render().unwrap();
    assert_eq!(
        report(&context(TRADES, TEAMS)),
        report(&context(TRADES, TEAMS))
    );
}

#[test]
fn empty_trade_ledger_exports_empty_awards() {
    let ctx = context(EMPTY_TRADES, TEAMS);
    let value: Value = serde_json::from_str(&export(&ctx, &Settings::default())).unwrap();

    assert_eq!(value["best_trade"], json!({}));
    assert_eq!(value["worst_trade"], json!({}));
    assert_eq!(value["fleece_award"], json!({}));
    assert_eq!(value["league_stats"]["total_trades"], 0);
    assert_eq!(value["trade_rankings"], json!([]));
    assert_eq!(value["winner"]["manager"], "PTexas");
}

#[test]
fn consistent_ledgers_reconcile_cleanly() {
    let ctx = context(TRADES, TEAMS);
    assert!(reconcile(&ctx, dec!(1)).is_empty());

    let ctx = context(EMPTY_TRADES, TEAMS);
    assert_eq!(reconcile(&ctx, dec!(1)).len(), 4);
}

#[test]
fn configured_ranking_size_is_honoured() {
    let ctx = context(TRADES, TEAMS);
    let mut settings = Settings::default();
    settings.report.top_rankings = 3;

    let summary = SeasonSummary::build(&ctx, &settings).unwrap();
    let names: Vec<_> = summary.rankings.iter().map(|r| r.manager.as_str()).collect();
    assert_eq!(names, vec!["PTexas", "Dzel45", "MaliciousKid"]);
}

#[test]
fn oversized_csv_value_is_rejected_before_valuation() {
    let trades = format!(
        "{}elite,2025-10-02,Player A,Player B,0,70000000000000000000000000000,70000000000000000000000000000,0\n",
        EMPTY_TRADES
    );
    let err = ledger::trades_from_reader(trades.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        ledger::LedgerError::InvalidValue { row: 1, field: "added_value_now", .. }
    ));
}
