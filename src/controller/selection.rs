use crate::entities::{SelectionMode, TravelMode};

/// Sent to the view layer whenever an active mode is (re)selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    SelectionModeChanged(SelectionMode),
    TravelModeChanged(TravelMode),
}

/// Active-state of every mode control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Indicators {
    pub selection: Vec<(SelectionMode, bool)>,
    pub travel: Vec<(TravelMode, bool)>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionController {
    mode: SelectionMode,
    travel_mode: TravelMode,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    pub fn set_mode(&mut self, mode: SelectionMode) -> Notification {
        self.mode = mode;
        Notification::SelectionModeChanged(mode)
    }

    pub fn set_travel_mode(&mut self, travel_mode: TravelMode) -> Notification {
        self.travel_mode = travel_mode;
        Notification::TravelModeChanged(travel_mode)
    }

    pub fn indicators(&self) -> Indicators {
        Indicators {
            selection: SelectionMode::ALL
                .into_iter()
                .map(|mode| (mode, mode == self.mode))
                .collect(),
            travel: TravelMode::ALL
                .into_iter()
                .map(|mode| (mode, mode == self.travel_mode))
                .collect(),
        }
    }
}

#[test]
fn initial_modes_test() {
    let controller = SelectionController::new();

    assert_eq!(controller.mode(), SelectionMode::Origin);
    assert_eq!(controller.travel_mode(), TravelMode::Car);
}

#[test]
fn last_selection_wins_test() {
    let mut controller = SelectionController::new();

    let sequence = [
        SelectionMode::Destination,
        SelectionMode::Destination,
        SelectionMode::Origin,
        SelectionMode::Destination,
    ];

    for mode in sequence {
        assert_eq!(
            controller.set_mode(mode),
            Notification::SelectionModeChanged(mode)
        );
        assert_eq!(controller.mode(), mode);

        let active: Vec<_> = controller
            .indicators()
            .selection
            .into_iter()
            .filter(|(_, on)| *on)
            .map(|(m, _)| m)
            .collect();
        assert_eq!(active, vec![mode]);
    }
}

#[test]
fn last_travel_mode_wins_test() {
    let mut controller = SelectionController::new();

    for mode in [
        TravelMode::Pedestrian,
        TravelMode::Motorcycle,
        TravelMode::Motorcycle,
        TravelMode::Car,
    ] {
        controller.set_travel_mode(mode);
        assert_eq!(controller.travel_mode(), mode);

        let indicators = controller.indicators();
        assert_eq!(indicators.travel.iter().filter(|(_, on)| *on).count(), 1);
        assert!(indicators.travel.contains(&(mode, true)));
        // travel changes never move the endpoint selection
        assert_eq!(controller.mode(), SelectionMode::Origin);
    }
}
