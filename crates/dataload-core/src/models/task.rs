use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Configurations,
    Users,
    Orders,
}

impl TaskKind {
    pub const ALL: [TaskKind; 3] = [TaskKind::Configurations, TaskKind::Users, TaskKind::Orders];

    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Configurations => "loadConfigurations()",
            TaskKind::Users => "loadUsers()",
            TaskKind::Orders => "loadOrders()",
        }
    }

    pub fn nominal_duration(self) -> Duration {
        match self {
            TaskKind::Configurations => Duration::from_secs(1),
            TaskKind::Users => Duration::from_secs(2),
            TaskKind::Orders => Duration::from_secs(3),
        }
    }
}

/// One simulated load: a named delay that reports when it finishes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Task {
    pub kind: TaskKind,
    pub duration: Duration,
}

impl Task {
    pub fn nominal(kind: TaskKind) -> Self {
        Self {
            kind,
            duration: kind.nominal_duration(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// The three loads, always in submission order: configurations, users, orders.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TaskSet {
    tasks: [Task; 3],
}

impl TaskSet {
    pub fn standard() -> Self {
        Self {
            tasks: TaskKind::ALL.map(Task::nominal),
        }
    }

    pub fn from_durations(configurations: Duration, users: Duration, orders: Duration) -> Self {
        Self {
            tasks: [
                Task {
                    kind: TaskKind::Configurations,
                    duration: configurations,
                },
                Task {
                    kind: TaskKind::Users,
                    duration: users,
                },
                Task {
                    kind: TaskKind::Orders,
                    duration: orders,
                },
            ],
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Task> + '_ {
        self.tasks.iter().copied()
    }

    pub fn total_duration(&self) -> Duration {
        self.tasks.iter().map(|task| task.duration).sum()
    }

    pub fn longest_duration(&self) -> Duration {
        self.tasks
            .iter()
            .map(|task| task.duration)
            .max()
            .unwrap_or_default()
    }

    pub fn is_strictly_increasing(&self) -> bool {
        self.tasks
            .windows(2)
            .all(|pair| pair[0].duration < pair[1].duration)
    }
}

impl Default for TaskSet {
    fn default() -> Self {
        Self::standard()
    }
}
