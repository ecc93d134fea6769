//! Built-in seed catalogue: a small, fully staffed enterprise used when a
//! store is empty or when the operator asks for a fresh start.
//!
//! Seed roles carry no reporting lines; structure is drawn by the operator.

use alloc::format;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use crate::grade::Grade;
use crate::ids::NodeId;
use crate::mix::default_mix_for_grade;
use crate::node::{OrgNode, Reporting};

/// (bucket, title, business unit)
const SEED_ROLES: &[(&str, &str, &str)] = &[
    ("Board", "Chairman & Managing Director (CMD)", "GL"),
    ("Leadership", "Chief Operating Officer (COO)", "GL"),
    ("Leadership", "Chief Financial Officer (CFO)", "GL"),
    ("Leadership", "Chief of Staff (CoS)", "GL"),
    ("Senior Management", "Head – Business Development", "GL"),
    ("Senior Management", "Head – Compliance & Risk", "GL"),
    ("Mid Management", "Admin Operations Lead", "GL"),
    ("Mid Management", "Controller – Finance", "GL"),
    ("Lead", "Tendering Lead", "GL"),
    ("Specialist", "Legal Manager", "GL"),
    ("Associates", "Associate – Recruitment", "GL"),
    ("Senior Management", "Project Director – Highways", "HBT"),
    ("Mid Management", "Design Lead – Highway", "HBT"),
    ("Mid Management", "Lead – QS (HBT)", "HBT"),
    ("Lead", "Sr. Bridge Design Engineer", "HBT"),
    ("Specialist", "Pavement Specialist", "HBT"),
    ("Associates", "AutoCAD Draughtsman", "HBT"),
    ("Leadership", "Sector Head – Railways & Metro", "Rail"),
    ("Senior Management", "Project Director – Metro", "Rail"),
    ("Mid Management", "Chief Signalling Expert", "Rail"),
    ("Mid Management", "Lead – Track Alignment", "Rail"),
    ("Lead", "Manager – Traction & E&M", "Rail"),
    ("Specialist", "Signalling Design Engineer", "Rail"),
    ("Associates", "Station Design Architect", "Rail"),
];

const SEED_INCUMBENTS: &[&str] = &[
    "Rajesh Kumar", "Priya Sharma", "Amit Patel", "Sneha Gupta", "Vikram Singh",
    "Anjali Verma", "Rahul Malhotra", "Kavita Reddy", "Suresh Nair", "Deepak Chopra",
    "Meera Iyer", "Arjun Rampal", "Nisha Desai", "Rohan Mehta", "Sanya Mirza",
    "Karan Johar", "Pooja Hegde", "Varun Dhawan", "Alia Bhatt", "Ranbir Kapoor",
    "Katrina Kaif", "Salman Khan", "Shahrukh Khan", "Aamir Khan",
];

fn seed_yoe(grade: Grade) -> &'static str {
    match grade {
        Grade::G7 => "20+ yrs",
        Grade::G6 => "15+ yrs",
        Grade::G5 => "10+ yrs",
        _ => "2–8 yrs",
    }
}

fn seed_ctc(grade: Grade) -> &'static str {
    match grade {
        Grade::G7 => "Board",
        Grade::G6 => "Executive",
        _ => "Standard",
    }
}

/// Build the seed collection; ids are `seed-<index>`.
pub fn seed_nodes(now: &str) -> Vec<OrgNode> {
    SEED_ROLES
        .iter()
        .enumerate()
        .map(|(idx, &(bucket, title, bu))| {
            let grade = Grade::from_bucket(bucket);
            OrgNode {
                id: NodeId::from_generated(format!("seed-{idx}")),
                grade,
                level: grade.default_level().map(ToString::to_string),
                title: title.to_string(),
                bu_name: bu.to_string(),
                tier_label: bucket.to_string(),
                purpose: format!("Accountable for outcomes and delivery excellence in {bu}."),
                archetype: "Standard".to_string(),
                roles: vec![title.to_string()],
                incumbent_name: SEED_INCUMBENTS[idx % SEED_INCUMBENTS.len()].to_string(),
                kpi: vec!["Delivery".to_string(), "Quality".to_string()],
                reporting: Reporting::default(),
                accountability: "Deliver outcomes with quality, cost control, and governance."
                    .to_string(),
                yoe: seed_yoe(grade).to_string(),
                ctc: seed_ctc(grade).to_string(),
                work_mix: default_mix_for_grade(grade),
                cost_object: "Project".to_string(),
                charge_rule: "Direct".to_string(),
                location: grade.location(),
                archived: false,
                created_at: now.to_string(),
                updated_at: now.to_string(),
            }
        })
        .collect()
}
