use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvoidanceFlag {
    TollRoad,
    LimitedAccess,
    Unpaved,
}

impl AvoidanceFlag {
    pub const ALL: [AvoidanceFlag; 3] = [Self::TollRoad, Self::LimitedAccess, Self::Unpaved];

    /// Constraint name understood by the routing engine.
    pub fn constraint(&self) -> &'static str {
        match self {
            Self::TollRoad => "toll road",
            Self::LimitedAccess => "Limited Access",
            Self::Unpaved => "unpaved",
        }
    }

    pub fn from_constraint(constraint: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.constraint() == constraint)
    }
}

/// Membership set of avoidance flags.
///
/// Equality ignores order; iteration follows the order flags were switched on
/// so serialized constraint lists are deterministic.
#[derive(Clone, Debug, Default)]
pub struct AvoidSet {
    flags: Vec<AvoidanceFlag>,
}

impl AvoidSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, flag: AvoidanceFlag) -> bool {
        if self.contains(flag) {
            return false;
        }

        self.flags.push(flag);
        true
    }

    pub fn remove(&mut self, flag: AvoidanceFlag) -> bool {
        let before = self.flags.len();
        self.flags.retain(|f| *f != flag);
        self.flags.len() != before
    }

    pub fn set(&mut self, flag: AvoidanceFlag, enabled: bool) {
        if enabled {
            self.insert(flag);
        } else {
            self.remove(flag);
        }
    }

    pub fn contains(&self, flag: AvoidanceFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = AvoidanceFlag> + '_ {
        self.flags.iter().copied()
    }

    pub fn constraints(&self) -> Vec<String> {
        self.iter().map(|flag| flag.constraint().to_string()).collect()
    }

    /// Reads an engine-reported constraint list. Unknown names are skipped.
    pub fn from_constraints<S: AsRef<str>>(constraints: &[S]) -> Self {
        let mut set = Self::new();

        for constraint in constraints {
            match AvoidanceFlag::from_constraint(constraint.as_ref()) {
                Some(flag) => {
                    set.insert(flag);
                }
                None => tracing::warn!(
                    "ignoring unknown engine constraint \"{}\"",
                    constraint.as_ref()
                ),
            }
        }

        set
    }
}

impl PartialEq for AvoidSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|flag| other.contains(flag))
    }
}

impl FromIterator<AvoidanceFlag> for AvoidSet {
    fn from_iter<I: IntoIterator<Item = AvoidanceFlag>>(iter: I) -> Self {
        let mut set = Self::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

#[test]
fn avoid_set_keeps_toggle_order_test() {
    let mut avoids = AvoidSet::new();
    avoids.set(AvoidanceFlag::Unpaved, true);
    avoids.set(AvoidanceFlag::TollRoad, true);
    avoids.set(AvoidanceFlag::Unpaved, true);

    assert_eq!(avoids.constraints(), vec!["unpaved", "toll road"]);

    avoids.set(AvoidanceFlag::Unpaved, false);
    avoids.set(AvoidanceFlag::LimitedAccess, true);
    avoids.set(AvoidanceFlag::Unpaved, true);

    assert_eq!(
        avoids.constraints(),
        vec!["toll road", "Limited Access", "unpaved"]
    );
}

#[test]
fn avoid_set_equality_ignores_order_test() {
    let a: AvoidSet = [AvoidanceFlag::TollRoad, AvoidanceFlag::Unpaved]
        .into_iter()
        .collect();
    let b: AvoidSet = [AvoidanceFlag::Unpaved, AvoidanceFlag::TollRoad]
        .into_iter()
        .collect();
    let c: AvoidSet = [AvoidanceFlag::Unpaved].into_iter().collect();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn avoid_set_from_engine_constraints_test() {
    let applied = AvoidSet::from_constraints(&["Limited Access", "ferry", "toll road", "toll road"]);

    assert_eq!(applied.len(), 2);
    assert!(applied.contains(AvoidanceFlag::LimitedAccess));
    assert!(applied.contains(AvoidanceFlag::TollRoad));
    assert!(!applied.contains(AvoidanceFlag::Unpaved));
}
