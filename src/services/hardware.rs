//! Hardware catalog for the lab tracks.
//!
//! Static reference data: components, lab setups, labs, and the cloud versus
//! on-prem trade-offs that matter for sim-to-real transfer.

use serde::Serialize;
use serde_json::{Value, json};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize)]
pub struct HardwareComponent {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// `processors`, `sensors` or `actuators`.
    pub category: &'static str,
    pub manufacturer: &'static str,
    pub model: &'static str,
    pub specifications: Value,
    pub price: Option<f64>,
    /// `cloud`, `on-prem` or `both`.
    pub availability: &'static str,
    /// Milliseconds.
    pub sim_to_real_latency: Option<f64>,
    pub sim_to_real_accuracy: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HardwareSetup {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub components: Vec<&'static str>,
    pub difficulty_level: &'static str,
    pub estimated_cost: Option<f64>,
    pub estimated_time: &'static str,
    pub lab_path: &'static str,
    pub sim_to_real_considerations: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HardwareLab {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub setup_id: &'static str,
    pub requirements: Vec<&'static str>,
    pub safety_considerations: Vec<&'static str>,
    pub cloud_vs_on_prem_comparison: Value,
    pub latency_warnings: Vec<&'static str>,
    pub sim_to_real_warnings: Vec<&'static str>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct HardwareRecommendation {
    pub id: &'static str,
    pub component_id: &'static str,
    pub use_case: &'static str,
    /// `essential`, `recommended` or `optional`.
    pub recommendation_type: &'static str,
    pub justification: &'static str,
    pub alternative_options: Vec<&'static str>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatencyConsideration {
    pub threshold: &'static str,
    pub application: &'static str,
    pub risk: &'static str,
    pub mitigation: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimToRealWarning {
    pub category: &'static str,
    pub warning: &'static str,
    pub impact: &'static str,
    pub solution: &'static str,
}

#[must_use]
pub fn components() -> Vec<HardwareComponent> {
    vec![
        HardwareComponent {
            id: "comp-1",
            name: "NVIDIA Jetson AGX Orin",
            description: "AI supercomputer for autonomous machines",
            category: "processors",
            manufacturer: "NVIDIA",
            model: "Jetson AGX Orin",
            specifications: json!({
                "cpu": "12-core ARM Cortex-A78AE v8.2 64-bit",
                "gpu": "NVIDIA Ampere architecture with 2048 CUDA cores",
                "memory": "32GB 256-bit LPDDR5",
                "ai_performance": "275 TOPS (int8)"
            }),
            price: Some(599.0),
            availability: "both",
            sim_to_real_latency: Some(10.0),
            sim_to_real_accuracy: Some(0.95),
        },
        HardwareComponent {
            id: "comp-2",
            name: "LDS-01 Laser Distance Sensor",
            description: "2D LIDAR sensor for navigation and mapping",
            category: "sensors",
            manufacturer: "Hokuyo",
            model: "URG-04LX-UG01",
            specifications: json!({
                "range": "0.06m to 5.6m",
                "angle": "240 degrees",
                "accuracy": "±30mm",
                "scan_time": "0.1 sec"
            }),
            price: Some(450.0),
            availability: "both",
            sim_to_real_latency: Some(5.0),
            sim_to_real_accuracy: Some(0.98),
        },
        HardwareComponent {
            id: "comp-3",
            name: "Dynamixel MX-28 Servo",
            description: "High-performance servo for humanoid joints",
            category: "actuators",
            manufacturer: "Robotis",
            model: "MX-28",
            specifications: json!({
                "torque": "2.5 N·m at 12V",
                "speed": "55 RPM at 12V",
                "resolution": "0.344 degree",
                "communication": "RS-485"
            }),
            price: Some(120.0),
            availability: "both",
            sim_to_real_latency: Some(2.0),
            sim_to_real_accuracy: Some(0.92),
        },
    ]
}

#[must_use]
pub fn setups() -> Vec<HardwareSetup> {
    vec![
        HardwareSetup {
            id: "setup-1",
            name: "Cloud-Based Humanoid Lab",
            description: "Complete humanoid robotics lab using cloud simulation",
            components: vec!["comp-1", "comp-2", "comp-3"],
            difficulty_level: "intermediate",
            estimated_cost: Some(1169.0),
            estimated_time: "1-2 weeks",
            lab_path: "cloud",
            sim_to_real_considerations: vec![
                "Higher latency when connecting to physical hardware",
                "Need for stable internet connection",
                "Cloud simulation accuracy may vary",
            ],
        },
        HardwareSetup {
            id: "setup-2",
            name: "On-Prem Humanoid Lab",
            description: "Complete humanoid robotics lab with local simulation",
            components: vec!["comp-1", "comp-2", "comp-3"],
            difficulty_level: "advanced",
            estimated_cost: Some(1169.0),
            estimated_time: "2-4 weeks",
            lab_path: "on-prem",
            sim_to_real_considerations: vec![
                "Lower latency for real-time control",
                "Higher computational requirements",
                "More complex setup and maintenance",
            ],
        },
    ]
}

#[must_use]
pub fn labs() -> Vec<HardwareLab> {
    let now = OffsetDateTime::now_utc();
    vec![
        HardwareLab {
            id: "lab-1",
            name: "Humanoid Navigation Lab",
            description: "Implement navigation algorithms on a humanoid robot",
            setup_id: "setup-1",
            requirements: vec![
                "NVIDIA Jetson AGX Orin",
                "LDS-01 Laser Distance Sensor",
                "Dynamixel MX-28 Servos (20 units)",
            ],
            safety_considerations: vec![
                "Ensure safe operating area",
                "Implement emergency stop mechanisms",
                "Monitor robot behavior at all times",
            ],
            cloud_vs_on_prem_comparison: json!({
                "latency": {"cloud": "50-100ms", "on_prem": "5-10ms"},
                "cost": {"cloud": "$200/month", "on_prem": "$1200 one-time"},
                "setup_time": {"cloud": "1 day", "on_prem": "1 week"},
                "maintenance": {"cloud": "Minimal", "on_prem": "High"}
            }),
            latency_warnings: vec![
                "High latency (>50ms) can cause instability in real-time control",
                "Network jitter can affect sensor data accuracy",
            ],
            sim_to_real_warnings: vec![
                "Simulation physics may not perfectly match real-world behavior",
                "Motor dynamics in simulation may differ from physical motors",
            ],
            created_at: now,
            updated_at: now,
        },
        HardwareLab {
            id: "lab-2",
            name: "Humanoid Manipulation Lab",
            description: "Implement manipulation algorithms on a humanoid robot",
            setup_id: "setup-2",
            requirements: vec![
                "NVIDIA Jetson AGX Orin",
                "RGB-D Camera",
                "Dynamixel MX-28 Servos (24 units)",
            ],
            safety_considerations: vec![
                "Ensure workspace is clear of obstacles",
                "Implement force limiting on actuators",
                "Use safety barriers when necessary",
            ],
            cloud_vs_on_prem_comparison: json!({
                "latency": {"cloud": "60-120ms", "on_prem": "10-15ms"},
                "cost": {"cloud": "$300/month", "on_prem": "$1500 one-time"},
                "setup_time": {"cloud": "2 days", "on_prem": "2 weeks"},
                "maintenance": {"cloud": "Minimal", "on_prem": "High"}
            }),
            latency_warnings: vec![
                "Manipulation tasks require low latency (<20ms) for stability",
                "High latency can cause jerky movements and potential damage",
            ],
            sim_to_real_warnings: vec![
                "Contact physics in simulation may not match real-world",
                "Object friction and compliance models may differ significantly",
            ],
            created_at: now,
            updated_at: now,
        },
    ]
}

/// Beginners and intermediates get the processor and LIDAR; anyone else gets
/// the servo.
#[must_use]
pub fn recommendations(user_experience: &str) -> Vec<HardwareRecommendation> {
    let now = OffsetDateTime::now_utc();
    if matches!(user_experience, "beginner" | "intermediate") {
        vec![
            HardwareRecommendation {
                id: "rec-1",
                component_id: "comp-1",
                use_case: "AI processing for humanoid control",
                recommendation_type: "essential",
                justification: "Required for running AI models on the robot",
                alternative_options: vec!["NVIDIA Jetson Nano", "Raspberry Pi 4"],
                created_at: now,
            },
            HardwareRecommendation {
                id: "rec-2",
                component_id: "comp-2",
                use_case: "Navigation and mapping",
                recommendation_type: "recommended",
                justification: "Helps with autonomous navigation capabilities",
                alternative_options: vec!["Stereo Camera", "Ultrasonic Sensors"],
                created_at: now,
            },
        ]
    } else {
        vec![HardwareRecommendation {
            id: "rec-3",
            component_id: "comp-3",
            use_case: "Humanoid joint control",
            recommendation_type: "essential",
            justification: "Core component for humanoid robot movement",
            alternative_options: vec!["AX-12 Servos", "Custom Actuators"],
            created_at: now,
        }]
    }
}

#[must_use]
pub fn cloud_vs_on_prem() -> Value {
    json!({
        "performance": {
            "cloud": {
                "latency": "50-100ms average",
                "throughput": "Depends on internet connection",
                "reliability": "99.9% uptime (provider dependent)"
            },
            "on_prem": {
                "latency": "5-15ms average",
                "throughput": "Limited by local hardware",
                "reliability": "Depends on local setup"
            }
        },
        "cost": {
            "cloud": {
                "initial": "$0-$500",
                "monthly": "$100-$500",
                "scaling": "Pay-as-you-go"
            },
            "on_prem": {
                "initial": "$1000-$5000",
                "monthly": "$20-$100 (electricity/maintenance)",
                "scaling": "Capital expense"
            }
        },
        "sim_to_real_considerations": {
            "cloud": [
                "Higher network latency affects real-time control",
                "Bandwidth limitations may affect sensor data transfer",
                "Internet reliability affects consistency"
            ],
            "on_prem": [
                "Lower latency enables better real-time control",
                "No network dependency for local operations",
                "Higher initial investment in hardware"
            ]
        }
    })
}

#[must_use]
pub fn latency_considerations() -> Vec<LatencyConsideration> {
    vec![
        LatencyConsideration {
            threshold: "< 10ms",
            application: "High-frequency control loops",
            risk: "Instability and oscillation",
            mitigation: "Use local processing and high-speed communication",
        },
        LatencyConsideration {
            threshold: "10-50ms",
            application: "Standard control and planning",
            risk: "Reduced responsiveness",
            mitigation: "Predictive control and buffering",
        },
        LatencyConsideration {
            threshold: "> 50ms",
            application: "High-level decision making",
            risk: "Poor user experience",
            mitigation: "Offload to cloud for non-critical tasks",
        },
    ]
}

#[must_use]
pub fn sim_to_real_warnings() -> Vec<SimToRealWarning> {
    vec![
        SimToRealWarning {
            category: "Physics Simulation",
            warning: "Simulated physics may not perfectly match real-world behavior",
            impact: "Controllers trained in simulation may fail on real hardware",
            solution: "Use domain randomization and system identification",
        },
        SimToRealWarning {
            category: "Sensor Noise",
            warning: "Simulated sensors are often idealized compared to real sensors",
            impact: "Algorithms may be sensitive to real-world noise",
            solution: "Add realistic noise models to simulation",
        },
        SimToRealWarning {
            category: "Actuator Dynamics",
            warning: "Motor response and compliance may differ between sim and reality",
            impact: "Control commands may cause unexpected behavior",
            solution: "Characterize real actuators and tune simulation parameters",
        },
    ]
}

#[cfg(test)]
#[path = "hardware_test.rs"]
mod tests;
