use crate::error::ExportError;
use crate::units::{grouped, join_assets, one_decimal, signed, whole};
use analyzer::{
    AwardSelector, LeagueContext, LeagueNarrative, LossDiagnosis, PartitionStats, TradeSelection,
    is_breakout,
};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};
use configuration::Settings;
use rust_decimal::Decimal;

const RULE_WIDTH: usize = 100;
const DATE_FORMAT: &str = "%b %d, %Y";

/// Sectioned text report over a league context.
///
/// Carries the same figures as `SeasonSummary`, plus the full trade tables,
/// loss diagnoses, active-trader histories and the playoff breakdown.
pub struct ConsoleReport<'a> {
    ctx: &'a LeagueContext,
    settings: &'a Settings,
}

impl<'a> ConsoleReport<'a> {
    pub fn new(ctx: &'a LeagueContext, settings: &'a Settings) -> Self {
        Self { ctx, settings }
    }

    pub fn render(&self) -> Result<String, ExportError> {
        let selector = AwardSelector::new(self.ctx);
        let sections = [
            self.standings()?,
            self.all_trades(&selector)?,
            self.best(&selector)?,
            self.fleece(&selector)?,
            self.worst(&selector)?,
            self.most_active(&selector)?,
            self.playoffs(&selector)?,
            self.trade_rankings()?,
            self.league_totals(&selector)?,
        ];
        Ok(sections.join("\n"))
    }

    fn standings(&self) -> Result<String, ExportError> {
        let season = &self.settings.report.season;
        let title = if season.is_empty() {
            "GMOTY STANDINGS".to_string()
        } else {
            format!("GMOTY {season} STANDINGS")
        };
        let mut out = heading(&title);

        match self.ctx.winner() {
            Some(winner) => {
                let name = match self.settings.league.full_name(&winner.manager) {
                    Some(full_name) => format!("{} ({full_name})", winner.manager),
                    None => winner.manager.clone(),
                };
                out.push_str(&format!(
                    "Manager of the Year: {name} with {} points\n\n",
                    grouped(whole("winner.score", winner.gmoty_score)?)
                ));
            }
            None => {
                out.push_str("No managers in the team ledger\n");
                return Ok(out);
            }
        }

        let mut table = table(&[
            "Rank",
            "Manager",
            "Wins",
            "Playoffs",
            "Trades",
            "Value Change",
            "GMOTY Score",
        ]);
        for (index, record) in self.ctx.standings().iter().enumerate() {
            table.add_row(vec![
                (index + 1).to_string(),
                record.manager.clone(),
                record.wins.to_string(),
                if record.made_playoffs { "yes" } else { "no" }.to_string(),
                record.trade_count.to_string(),
                signed(whole("total_change", record.total_change)?),
                grouped(whole("gmoty_score", record.gmoty_score)?),
            ]);
        }
        align_right(&mut table, &[0, 2, 4, 5, 6]);
        push_table(&mut out, &table);
        Ok(out)
    }

    fn all_trades(&self, selector: &AwardSelector<'_>) -> Result<String, ExportError> {
        let mut out = heading("ALL TRADES WITH FULL VALUE DETAILS");
        let selection = selector.best_trades(self.ctx.trades().len());
        if !selection.has_trades() {
            out.push_str("No trades to analyze\n");
            return Ok(out);
        }

        let mut table = table(&[
            "#",
            "Manager",
            "Date",
            "Acquired",
            "Sent",
            "Acquired Change",
            "Sent Change",
            "Net At Trade",
            "Net Now",
            "Value Shift",
            "Assessment",
        ]);
        for (index, trade) in selection.iter().enumerate() {
            table.add_row(vec![
                (index + 1).to_string(),
                trade.manager().to_string(),
                trade.trade_date().format(DATE_FORMAT).to_string(),
                join_assets(trade.added_assets()),
                join_assets(trade.dropped_assets()),
                signed(whole("acquired_change", trade.acquired_change())?),
                signed(whole("sent_change", trade.sent_change())?),
                signed(whole("immediate_net", trade.immediate_net())?),
                signed(whole("current_net", trade.current_net())?),
                signed(whole("post_trade_appreciation", trade.post_trade_appreciation())?),
                format!(
                    "{} - {}",
                    trade.assessment().as_str().to_uppercase(),
                    trade.assessment().summary()
                ),
            ]);
        }
        align_right(&mut table, &[0, 5, 6, 7, 8, 9]);
        push_table(&mut out, &table);
        Ok(out)
    }

    fn best(&self, selector: &AwardSelector<'_>) -> Result<String, ExportError> {
        let n = self.settings.report.best_trades;
        let mut out = heading("BEST TRADES");
        let selection = selector.best_trades(n);
        if no_trades(&mut out, &selection) {
            return Ok(out);
        }

        out.push_str(&format!("Top {n} trades by current net value:\n\n"));
        let mut table = table(&["#", "Manager", "Date", "Acquired", "Sent", "Value Gain"]);
        for (index, trade) in selection.iter().enumerate() {
            table.add_row(vec![
                (index + 1).to_string(),
                trade.manager().to_string(),
                trade.trade_date().format(DATE_FORMAT).to_string(),
                join_assets(trade.added_assets()),
                join_assets(trade.dropped_assets()),
                signed(whole("current_net", trade.current_net())?),
            ]);
        }
        align_right(&mut table, &[0, 5]);
        push_table(&mut out, &table);
        Ok(out)
    }

    fn fleece(&self, selector: &AwardSelector<'_>) -> Result<String, ExportError> {
        let n = self.settings.report.fleece_candidates;
        let mut out = heading("THE FLEECE AWARD");
        let selection = selector.fleece_trades(n);
        if no_trades(&mut out, &selection) {
            return Ok(out);
        }

        out.push_str(&format!(
            "Top {n} trades by post-trade appreciation (bought low, value exploded):\n\n"
        ));
        let mut table = table(&[
            "#",
            "Manager",
            "Date",
            "Acquired",
            "Sent",
            "Net At Trade",
            "Net Now",
            "Post-Trade Gain",
            "Breakout",
        ]);
        for (index, trade) in selection.iter().enumerate() {
            table.add_row(vec![
                (index + 1).to_string(),
                trade.manager().to_string(),
                trade.trade_date().format(DATE_FORMAT).to_string(),
                join_assets(trade.added_assets()),
                join_assets(trade.dropped_assets()),
                signed(whole("immediate_net", trade.immediate_net())?),
                signed(whole("current_net", trade.current_net())?),
                signed(whole("post_trade_appreciation", trade.post_trade_appreciation())?),
                if is_breakout(trade) { "bought before breakout" } else { "" }.to_string(),
            ]);
        }
        align_right(&mut table, &[0, 5, 6, 7]);
        push_table(&mut out, &table);
        Ok(out)
    }

    fn worst(&self, selector: &AwardSelector<'_>) -> Result<String, ExportError> {
        let n = self.settings.report.worst_trades;
        let mut out = heading("WORST TRADES");
        let selection = selector.worst_trades(n);
        if no_trades(&mut out, &selection) {
            return Ok(out);
        }

        out.push_str(&format!("Bottom {n} trades (most value lost):\n\n"));
        let mut table = table(&[
            "#",
            "Manager",
            "Date",
            "Acquired",
            "Sent",
            "Net At Trade",
            "Net Now",
            "Total Damage",
            "Diagnosis",
        ]);
        for (index, trade) in selection.iter().enumerate() {
            table.add_row(vec![
                (index + 1).to_string(),
                trade.manager().to_string(),
                trade.trade_date().format(DATE_FORMAT).to_string(),
                join_assets(trade.added_assets()),
                join_assets(trade.dropped_assets()),
                signed(whole("immediate_net", trade.immediate_net())?),
                signed(whole("current_net", trade.current_net())?),
                grouped(whole("current_net", trade.current_net().abs())?),
                LossDiagnosis::of(trade).describe().to_string(),
            ]);
        }
        align_right(&mut table, &[0, 5, 6, 7]);
        push_table(&mut out, &table);
        Ok(out)
    }

    fn most_active(&self, selector: &AwardSelector<'_>) -> Result<String, ExportError> {
        let mut out = heading("MOST ACTIVE TRADERS");
        let Some(active) = selector.most_active() else {
            out.push_str("No managers in the team ledger\n");
            return Ok(out);
        };
        out.push_str(&format!(
            "Most active traders ({} trades each):\n",
            active.trade_count
        ));

        for profile in selector.active_trader_profiles() {
            let record = profile.manager;
            let average = match record.avg_trade_performance {
                Some(average) => signed(whole("avg_trade_performance", average)?),
                None => "N/A".to_string(),
            };
            out.push_str(&format!(
                "\n  {}\n    Total trade value gained: {}\n    Average per trade: {}\n    Overall GMOTY rank: {}\n",
                record.manager,
                signed(whole("total_trade_value_gained", record.total_trade_value_gained)?),
                average,
                profile.rank,
            ));
            if profile.trades.is_empty() {
                continue;
            }
            out.push_str("    Trade record:\n");
            for (index, trade) in profile.trades.iter().enumerate() {
                let marker = if trade.current_net() > Decimal::ZERO { "✓" } else { "✗" };
                out.push_str(&format!(
                    "      {marker} Trade {}: {}\n",
                    index + 1,
                    signed(whole("current_net", trade.current_net())?)
                ));
            }
        }
        Ok(out)
    }

    fn playoffs(&self, selector: &AwardSelector<'_>) -> Result<String, ExportError> {
        let split = selector.playoff_split();
        let mut out = heading("PLAYOFF IMPACT");

        for (label, side) in [
            ("Playoff Teams", &split.playoff),
            ("Non-Playoff Teams", &split.non_playoff),
        ] {
            out.push_str(&format!("\n{label} ({}):\n\n", side.len()));
            if side.is_empty() {
                continue;
            }
            let mut table = table(&["Manager", "Wins", "Value Change", "GMOTY Score"]);
            for record in &side.managers {
                table.add_row(vec![
                    record.manager.clone(),
                    record.wins.to_string(),
                    signed(whole("total_change", record.total_change)?),
                    grouped(whole("gmoty_score", record.gmoty_score)?),
                ]);
            }
            align_right(&mut table, &[1, 2, 3]);
            push_table(&mut out, &table);
            out.push_str(&partition_averages(side)?);
        }

        if let Some(premium) = split.premium {
            out.push_str(&format!(
                "\nPlayoff premium: average GMOTY gap of {} points\n",
                signed(whole("premium", premium)?)
            ));
        }
        Ok(out)
    }

    fn trade_rankings(&self) -> Result<String, ExportError> {
        let mut out = heading("TRADE VALUE RANKINGS");
        let summaries = self.ctx.summaries();
        if summaries.is_empty() {
            out.push_str("No trades to analyze\n");
            return Ok(out);
        }

        let mut table = table(&[
            "#",
            "Manager",
            "Trades",
            "Total Value Gained",
            "Avg Per Trade",
            "Net At Trade",
        ]);
        for (index, stats) in summaries.iter().enumerate() {
            table.add_row(vec![
                (index + 1).to_string(),
                stats.manager.clone(),
                stats.trade_count.to_string(),
                signed(whole("total_current_net", stats.total_current_net)?),
                format!("{:+.1}", one_decimal(stats.mean_current_net)),
                signed(whole("total_immediate_net", stats.total_immediate_net)?),
            ]);
        }
        align_right(&mut table, &[0, 2, 3, 4, 5]);
        push_table(&mut out, &table);
        Ok(out)
    }

    fn league_totals(&self, selector: &AwardSelector<'_>) -> Result<String, ExportError> {
        let narrative = LeagueNarrative::from_context(self.ctx);
        let league = &self.settings.league;
        let mut out = heading("LEAGUE TOTALS");

        let mut table = table(&["Metric", "Value"]);
        table.add_row(vec![
            "Total trades".to_string(),
            analyzer::logical_trade_count(narrative.trade_sides).to_string(),
        ]);
        if let Some(claims) = league.waiver_claims {
            table.add_row(vec!["Waiver claims".to_string(), claims.to_string()]);
        }
        if let Some(pickups) = league.fa_pickups {
            table.add_row(vec!["FA pickups".to_string(), pickups.to_string()]);
        }
        table.add_row(vec![
            "Net value".to_string(),
            signed(whole("net_value", narrative.net_value)?),
        ]);
        if let Some(active) = selector.most_active() {
            let names: Vec<&str> = active.managers.iter().map(|m| m.manager.as_str()).collect();
            table.add_row(vec![
                "Most active".to_string(),
                format!("{} ({} trades)", names.join(", "), active.trade_count),
            ]);
        }
        table.add_row(vec![
            "Managers without a trade".to_string(),
            format!("{} of {}", narrative.managers_without_trades, narrative.managers),
        ]);
        table.add_row(vec![
            "Draft picks traded".to_string(),
            narrative.draft_picks_traded.to_string(),
        ]);
        table.add_row(vec![
            "Managers gaining value".to_string(),
            format!("{} of {}", narrative.managers_gaining_value, narrative.managers),
        ]);
        align_right(&mut table, &[1]);
        push_table(&mut out, &table);
        Ok(out)
    }
}

fn heading(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title}\n{rule}\n")
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

fn align_right(table: &mut Table, columns: &[usize]) {
    for &index in columns {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn push_table(out: &mut String, table: &Table) {
    out.push_str(&table.to_string());
    out.push('\n');
}

/// Writes the empty-ledger line and reports whether the section is done.
fn no_trades(out: &mut String, selection: &TradeSelection<'_>) -> bool {
    if selection.has_trades() {
        return false;
    }
    out.push_str("No trades to analyze\n");
    true
}

fn partition_averages(side: &PartitionStats<'_>) -> Result<String, ExportError> {
    let (Some(wins), Some(change), Some(score)) = (
        side.mean_wins,
        side.mean_total_change,
        side.mean_gmoty_score,
    ) else {
        return Ok(String::new());
    };
    Ok(format!(
        "Average: {:.1} wins, {} value change, {} GMOTY score\n",
        one_decimal(wins),
        signed(whole("mean_total_change", change)?),
        grouped(whole("mean_gmoty_score", score)?)
    ))
}
