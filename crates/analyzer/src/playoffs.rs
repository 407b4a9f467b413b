use crate::context::LeagueContext;
use core_types::ManagerRecord;
use rust_decimal::Decimal;

/// Averages over one side of the playoff line.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionStats<'a> {
    pub managers: Vec<&'a ManagerRecord>,
    pub mean_wins: Option<Decimal>,
    pub mean_total_change: Option<Decimal>,
    pub mean_gmoty_score: Option<Decimal>,
}

impl<'a> PartitionStats<'a> {
    fn from_managers(managers: Vec<&'a ManagerRecord>) -> Self {
        Self {
            mean_wins: mean(managers.iter().map(|m| Decimal::from(m.wins))),
            mean_total_change: mean(managers.iter().map(|m| m.total_change)),
            mean_gmoty_score: mean(managers.iter().map(|m| m.gmoty_score)),
            managers,
        }
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}

/// Playoff teams against everyone else.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayoffSplit<'a> {
    pub playoff: PartitionStats<'a>,
    pub non_playoff: PartitionStats<'a>,
    /// Playoff mean GMOTY score minus non-playoff mean. Absent when either side is empty.
    pub premium: Option<Decimal>,
}

impl<'a> PlayoffSplit<'a> {
    /// Partitions the standings by `made_playoffs`, keeping rank order in each side.
    pub fn from_context(ctx: &'a LeagueContext) -> Self {
        let (playoff, non_playoff): (Vec<_>, Vec<_>) =
            ctx.standings().iter().partition(|m| m.made_playoffs);

        let playoff = PartitionStats::from_managers(playoff);
        let non_playoff = PartitionStats::from_managers(non_playoff);
        let premium = playoff
            .mean_gmoty_score
            .zip(non_playoff.mean_gmoty_score)
            .map(|(made, missed)| made - missed);

        Self {
            playoff,
            non_playoff,
            premium,
        }
    }
}

fn mean(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    let (sum, count) = values.fold((Decimal::ZERO, 0u32), |(sum, count), value| {
        (sum + value, count + 1)
    });
    (count > 0).then(|| sum / Decimal::from(count))
}
