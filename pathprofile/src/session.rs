use crate::report::Report;
use linkbudget::{LinkBudget, Obstacle, Radio};
use mgr::Mgr;

/// Where an interactive calculation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AwaitMgrPair,
    AwaitRadio,
    AwaitFrequency,
    AwaitHeights,
    AwaitObstacleCount,
    /// Awaiting obstacle `i` (zero-based).
    AwaitObstacle(usize),
    Done,
}

/// Outcome of feeding one line of input to a session.
#[derive(Debug)]
pub enum Reply {
    /// Input accepted; what to ask next.
    Prompt(String),
    /// Input rejected; ask again, state unchanged.
    Invalid(String),
    /// All inputs gathered and the calculation succeeded.
    Report(Box<Report>),
    /// All inputs gathered but the calculation failed.
    Failed(String),
}

/// Accumulated inputs for one interactive calculation.
///
/// Each conversation owns its own `Session`; nothing is shared between
/// concurrent sessions, and the value is dropped when the flow
/// completes or is cancelled.
#[derive(Debug, Clone)]
pub struct Session {
    step: Step,
    mgrs: Option<(Mgr, Mgr)>,
    distance_km: f64,
    radio: Option<Radio>,
    freq_mhz: f64,
    tx_height_m: f64,
    rx_height_m: f64,
    expected_obstacles: usize,
    obstacles: Vec<Obstacle>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            step: Step::AwaitMgrPair,
            mgrs: None,
            distance_km: 0.0,
            radio: None,
            freq_mhz: 0.0,
            tx_height_m: 0.0,
            rx_height_m: 0.0,
            expected_obstacles: 0,
            obstacles: Vec::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// The question for the current step.
    pub fn prompt(&self) -> String {
        match self.step {
            Step::AwaitMgrPair => {
                "Please enter the two MGRs as such:\n100 100 200 200".to_string()
            }
            Step::AwaitRadio => "Radio type? 406 or 408".to_string(),
            Step::AwaitFrequency => {
                "Please enter transmitting frequency to 2 decimal places.".to_string()
            }
            Step::AwaitHeights => "Please enter height of transmitting and receiving node \
                                   to the nearest metre as such:\n30 40"
                .to_string(),
            Step::AwaitObstacleCount => {
                "Please enter number of obstacles between the two nodes.".to_string()
            }
            Step::AwaitObstacle(i) => format!(
                "Please enter distance between obstacle {n} and transmitting node to the \
                 nearest km and height of obstacle {n} to the nearest metres as such:\n5 30",
                n = i + 1
            ),
            Step::Done => "The calculation is complete.".to_string(),
        }
    }

    /// Feeds one line of input to the session.
    pub fn advance(&mut self, input: &str) -> Reply {
        match self.step {
            Step::AwaitMgrPair => self.take_mgr_pair(input),
            Step::AwaitRadio => self.take_radio(input),
            Step::AwaitFrequency => self.take_frequency(input),
            Step::AwaitHeights => self.take_heights(input),
            Step::AwaitObstacleCount => self.take_obstacle_count(input),
            Step::AwaitObstacle(i) => self.take_obstacle(input, i),
            Step::Done => Reply::Invalid(self.prompt()),
        }
    }

    fn take_mgr_pair(&mut self, input: &str) -> Reply {
        let (mgr1, mgr2) = match mgr::parse_pair(input) {
            Ok(pair) => pair,
            Err(err) => return Reply::Invalid(format!("{err}. Please enter again.")),
        };
        let distance_km = mgr1.distance(&mgr2);
        if distance_km == 0.0 {
            return Reply::Invalid("The two MGRs must not be identical. Please enter again.".into());
        }
        self.mgrs = Some((mgr1, mgr2));
        self.distance_km = distance_km;
        self.step = Step::AwaitRadio;
        Reply::Prompt(format!(
            "MGR 1: {mgr1}\nMGR 2: {mgr2}\nDistance: {distance_km:.1}km\n{}",
            self.prompt()
        ))
    }

    fn take_radio(&mut self, input: &str) -> Reply {
        let radio = match input.parse::<Radio>() {
            Ok(radio) => radio,
            Err(_) => return Reply::Invalid("Radio must be 406 or 408. Please enter again.".into()),
        };
        self.radio = Some(radio);
        self.step = Step::AwaitFrequency;
        Reply::Prompt(format!("Radio: {radio}\n{}", self.prompt()))
    }

    fn take_frequency(&mut self, input: &str) -> Reply {
        let Some(radio) = self.radio else {
            return Reply::Invalid("Radio must be chosen first.".into());
        };
        match input.trim().parse::<f64>() {
            Ok(freq_mhz) if radio.valid_freq(freq_mhz) => {
                self.freq_mhz = freq_mhz;
                self.step = Step::AwaitHeights;
                Reply::Prompt(format!(
                    "Transmitting frequency: {freq_mhz}MHz\n{}",
                    self.prompt()
                ))
            }
            _ => Reply::Invalid("Invalid frequency, please enter again.".into()),
        }
    }

    fn take_heights(&mut self, input: &str) -> Reply {
        let Some((tx_height_m, rx_height_m)) = parse_number_pair(input) else {
            return Reply::Invalid(
                "Heights must be two non-negative numbers, e.g. \"30 40\". Please enter again."
                    .into(),
            );
        };
        if tx_height_m < 0.0 || rx_height_m < 0.0 {
            return Reply::Invalid(
                "Heights must be two non-negative numbers, e.g. \"30 40\". Please enter again."
                    .into(),
            );
        }
        self.tx_height_m = tx_height_m;
        self.rx_height_m = rx_height_m;
        self.step = Step::AwaitObstacleCount;
        Reply::Prompt(format!(
            "Transmitting height: {tx_height_m}m\nReceiving height: {rx_height_m}m\n{}",
            self.prompt()
        ))
    }

    fn take_obstacle_count(&mut self, input: &str) -> Reply {
        let count = match input.trim().parse::<usize>() {
            Ok(count) => count,
            Err(_) => {
                return Reply::Invalid("Please enter a whole number of obstacles.".into());
            }
        };
        self.expected_obstacles = count;
        self.obstacles = Vec::with_capacity(count);
        if count == 0 {
            return self.finish();
        }
        self.step = Step::AwaitObstacle(0);
        Reply::Prompt(self.prompt())
    }

    fn take_obstacle(&mut self, input: &str, index: usize) -> Reply {
        let Some((distance_km, height_m)) = parse_number_pair(input) else {
            return Reply::Invalid(
                "Please enter obstacle distance and height as such:\n5 30".into(),
            );
        };
        let obstacle = Obstacle::new(distance_km, height_m);
        if height_m < 0.0 || obstacle.validate(self.distance_km).is_err() {
            return Reply::Invalid(
                "Obstacle must be between the two nodes. Please enter again.".into(),
            );
        }
        self.obstacles.push(obstacle);
        if self.obstacles.len() == self.expected_obstacles {
            return self.finish();
        }
        self.step = Step::AwaitObstacle(index + 1);
        Reply::Prompt(self.prompt())
    }

    fn finish(&mut self) -> Reply {
        self.step = Step::Done;
        let Some(radio) = self.radio else {
            return Reply::Failed("radio was never chosen".into());
        };
        let built = LinkBudget::builder()
            .radio(radio)
            .freq_mhz(self.freq_mhz)
            .distance_km(self.distance_km)
            .tx_height(self.tx_height_m)
            .rx_height(self.rx_height_m)
            .obstacles(self.obstacles.iter().copied())
            .build();
        match built {
            Ok(budget) => Reply::Report(Box::new(Report {
                mgrs: self.mgrs,
                radio,
                freq_mhz: self.freq_mhz,
                distance_km: self.distance_km,
                tx_height_m: self.tx_height_m,
                rx_height_m: self.rx_height_m,
                obstacles: self.obstacles.clone(),
                budget,
            })),
            Err(err) => Reply::Failed(format!("Calculation failed: {err}")),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Two whitespace-separated numbers, e.g. "30 40".
fn parse_number_pair(input: &str) -> Option<(f64, f64)> {
    let mut tokens = input.split_whitespace();
    let first = tokens.next()?.parse::<f64>().ok()?;
    let second = tokens.next()?.parse::<f64>().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((first, second))
}

#[cfg(test)]
mod tests {
    use super::{Reply, Session, Step};
    use linkbudget::Regime;

    fn expect_prompt(session: &mut Session, input: &str) {
        match session.advance(input) {
            Reply::Prompt(_) => (),
            other => panic!("expected prompt for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_unobstructed_walkthrough() {
        let mut session = Session::new();
        expect_prompt(&mut session, "100 100 200 200");
        expect_prompt(&mut session, "406");
        expect_prompt(&mut session, "610.00");
        expect_prompt(&mut session, "30 30");

        let report = match session.advance("0") {
            Reply::Report(report) => report,
            other => panic!("expected report, got {other:?}"),
        };
        assert_eq!(session.step(), Step::Done);
        assert_eq!(report.budget.regime, Regime::BelowFresnel);
        assert!(report.obstacles.is_empty());
        assert!(report.budget.viable);
    }

    #[test]
    fn test_obstacle_walkthrough() {
        let mut session = Session::new();
        expect_prompt(&mut session, "100 100 200 200");
        expect_prompt(&mut session, "406");
        expect_prompt(&mut session, "610.00");
        expect_prompt(&mut session, "30 30");
        expect_prompt(&mut session, "2");
        assert_eq!(session.step(), Step::AwaitObstacle(0));
        expect_prompt(&mut session, "3 50");

        let report = match session.advance("7 40") {
            Reply::Report(report) => report,
            other => panic!("expected report, got {other:?}"),
        };
        assert_eq!(report.obstacles.len(), 2);
        assert!(report.budget.obstacle.height_m > 50.0);
    }

    #[test]
    fn test_invalid_input_keeps_state() {
        let mut session = Session::new();

        assert!(matches!(session.advance("garbage"), Reply::Invalid(_)));
        assert_eq!(session.step(), Step::AwaitMgrPair);
        expect_prompt(&mut session, "100 100 200 200");

        assert!(matches!(session.advance("407"), Reply::Invalid(_)));
        assert_eq!(session.step(), Step::AwaitRadio);
        expect_prompt(&mut session, "406");

        // Off the 0.25MHz raster for a 406.
        assert!(matches!(session.advance("610.10"), Reply::Invalid(_)));
        assert_eq!(session.step(), Step::AwaitFrequency);
        expect_prompt(&mut session, "610.00");

        expect_prompt(&mut session, "30 30");
        expect_prompt(&mut session, "1");

        // Beyond the far node (the pair is ~14.1km apart).
        assert!(matches!(session.advance("20 30"), Reply::Invalid(_)));
        assert_eq!(session.step(), Step::AwaitObstacle(0));
    }

    #[test]
    fn test_identical_mgrs_rejected() {
        let mut session = Session::new();
        assert!(matches!(
            session.advance("100 100 100 100"),
            Reply::Invalid(_)
        ));
        assert_eq!(session.step(), Step::AwaitMgrPair);
    }
}
