//! "Better Habits" carousel content

use serde::Serialize;

/// One habit card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Habit {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    /// Icon name understood by the front end
    pub icon: &'static str,
    /// Card background as a hex color
    pub color: &'static str,
}

const BETTER_HABITS: [Habit; 5] = [
    Habit {
        id: 1,
        title: "Take a 10-minute walk",
        description: "Boost your mood and energy with a short walk outside",
        icon: "walk-outline",
        color: "#fef3c7",
    },
    Habit {
        id: 2,
        title: "Drink more water",
        description: "Stay hydrated throughout the day for better health",
        icon: "water-outline",
        color: "#dbeafe",
    },
    Habit {
        id: 3,
        title: "Practice deep breathing",
        description: "Reduce stress with 5 minutes of mindful breathing",
        icon: "leaf-outline",
        color: "#f3e8ff",
    },
    Habit {
        id: 4,
        title: "Stand up and stretch",
        description: "Take breaks to move your body and improve posture",
        icon: "body-outline",
        color: "#fef7cd",
    },
    Habit {
        id: 5,
        title: "Limit screen time",
        description: "Give your eyes a break and connect with the real world",
        icon: "eye-outline",
        color: "#e0e7ff",
    },
];

/// All habit cards in carousel order
pub fn better_habits() -> &'static [Habit] {
    &BETTER_HABITS
}

pub fn habit(id: u32) -> Option<&'static Habit> {
    BETTER_HABITS.iter().find(|h| h.id == id)
}
