//! Fixed course outline: five modules, four chapters each.

use serde::Serialize;
use time::OffsetDateTime;

use crate::services::content::ModuleType;

#[derive(Debug, Clone, Serialize)]
pub struct Module {
    pub id: String,
    pub title: &'static str,
    pub description: &'static str,
    pub module_type: ModuleType,
    pub order: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chapter {
    pub id: String,
    pub title: &'static str,
    pub module_id: String,
    pub order: u32,
    pub content: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

struct ModuleDef {
    title: &'static str,
    description: &'static str,
    module_type: ModuleType,
    chapters: [(&'static str, &'static str); 4],
}

const MODULES: [ModuleDef; 5] = [
    ModuleDef {
        title: "The Robotic Nervous System (ROS 2)",
        description: "Embodied Control & Middleware",
        module_type: ModuleType::Ros2,
        chapters: [
            ("Embodied Control and Middleware", "Introduction to embodied control systems and robotic middleware."),
            ("ROS 2 Nodes, Topics, Services, Actions", "Understanding ROS 2 communication patterns."),
            ("Python Agents & ROS Controllers", "Building Python-based ROS agents and controllers."),
            ("URDF for Humanoid Anatomy", "Creating URDF models for humanoid robots."),
        ],
    },
    ModuleDef {
        title: "The Digital Twin (Gazebo & Unity)",
        description: "Physics, Simulation & Interaction",
        module_type: ModuleType::GazeboUnity,
        chapters: [
            ("Physics, Gravity and Collision Modeling", "Rigid-body physics, gravity and collision geometry in simulation."),
            ("Gazebo Simulation Pipelines", "Building repeatable Gazebo worlds and launch pipelines."),
            ("Sensor Simulation", "Simulating cameras, LiDAR and IMUs with realistic noise."),
            ("Unity for Human-Robot Interaction", "Using Unity scenes to prototype human-robot interaction."),
        ],
    },
    ModuleDef {
        title: "The AI-Robot Brain (NVIDIA Isaac™)",
        description: "AI Integration & Transfer",
        module_type: ModuleType::NvidiaIsaac,
        chapters: [
            ("Isaac Sim and Synthetic Data", "Generating labelled synthetic data with Isaac Sim."),
            ("Isaac ROS and Hardware Acceleration", "GPU-accelerated perception with Isaac ROS packages."),
            ("VSLAM and Nav2 for Humanoids", "Visual SLAM and Nav2 navigation for legged platforms."),
            ("Sim-to-Real Transfer", "Closing the gap between simulated and physical robots."),
        ],
    },
    ModuleDef {
        title: "Vision–Language–Action (VLA)",
        description: "Multimodal AI & Safety",
        module_type: ModuleType::Vla,
        chapters: [
            ("Voice to Action", "Turning spoken commands into robot actions."),
            ("Cognitive Planning with LLMs", "Task decomposition and planning with language models."),
            ("Multimodal Perception", "Fusing vision and language for scene understanding."),
            ("Safety Constraints and Action Validation", "Validating generated actions against safety constraints."),
        ],
    },
    ModuleDef {
        title: "Capstone — Autonomous Humanoid",
        description: "Full System Integration",
        module_type: ModuleType::Humanoid,
        chapters: [
            ("System Architecture", "End-to-end architecture of an autonomous humanoid."),
            ("Navigation and Obstacle Avoidance", "Planning safe paths through dynamic environments."),
            ("Object Recognition and Manipulation", "Detecting, grasping and placing everyday objects."),
            ("Full Autonomous Demo", "Integrating every subsystem into a complete demonstration."),
        ],
    },
];

/// All modules in course order.
#[must_use]
pub fn modules() -> Vec<Module> {
    let now = OffsetDateTime::now_utc();
    (1u32..)
        .zip(MODULES.iter())
        .map(|(order, def)| Module {
            id: format!("module-{order}"),
            title: def.title,
            description: def.description,
            module_type: def.module_type,
            order,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Chapters of `module_id` (e.g. `module-2`). Unknown ids yield an empty list.
#[must_use]
pub fn chapters(module_id: &str) -> Vec<Chapter> {
    let Some(index) = module_id
        .strip_prefix("module-")
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| (1..=MODULES.len()).contains(n))
    else {
        return Vec::new();
    };
    let now = OffsetDateTime::now_utc();
    (1u32..)
        .zip(MODULES[index - 1].chapters.iter())
        .map(|(order, &(title, content))| Chapter {
            id: format!("ch-{index}-{order}"),
            title,
            module_id: module_id.to_string(),
            order,
            content,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Default study order: every chapter of every module.
#[must_use]
pub fn learning_path_ids() -> Vec<String> {
    (1..=MODULES.len())
        .flat_map(|m| (1..=4).map(move |c| format!("module-{m}-chapter-{c}")))
        .collect()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
