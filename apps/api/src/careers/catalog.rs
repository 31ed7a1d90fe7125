//! The fixed career catalog: skill categories and the job roles each skill
//! set maps onto. Content only; scoring lives in `matching`.

pub struct JobRole {
    pub name: &'static str,
    pub category: &'static str,
    pub skills: &'static [&'static str],
}

pub const SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Computer Science & IT",
        &[
            "C++", "JavaScript", "Node.js", "Python", "PyTorch", "TensorFlow", "React", "AWS",
            "APIs", "Systems", "Infrastructure", "Integration", "Analytics", "BI", "Data",
            "Deep Learning", "Machine Learning", "NLP", "Intelligence", "Algorithms", "SQL",
            "Tableau", "Software", "Automation", "SCADA", "PLC", "RTOS", "ROS", "FPGA",
            "Microcontrollers", "Digital Systems", "Workflows",
        ],
    ),
    (
        "Healthcare & Life Sciences",
        &[
            "Healthcare", "Medical", "Patient Care", "Clinical Trials", "EHR", "Telehealth",
            "Pharmacy", "Health Records", "Biochemistry", "Drug Development", "Fermentation",
            "FDA", "CDISC", "GCP", "HIPAA", "Quality Management", "Medical Devices", "Research",
            "Digital Health",
        ],
    ),
    (
        "Management & Business",
        &[
            "Finance", "Investment", "Portfolio Management", "Trading", "Budgeting",
            "Forecasting", "Risk Management", "Strategic Planning", "Leadership",
            "Business Development", "Project Management", "Agile", "Scrum", "Supply Chain",
            "Operations", "Marketing", "Sales", "Customer Relations",
        ],
    ),
    (
        "Engineering & Industrial",
        &[
            "Aerodynamics", "Structural Engineering", "Mechanical Engineering",
            "Electrical Engineering", "Circuit Design", "Signal Processing", "Power Systems",
            "Manufacturing", "Process Engineering", "Industrial Design", "CAD", "AutoCAD",
            "SolidWorks", "3D Modeling", "Robotics",
        ],
    ),
    (
        "Science & Research",
        &[
            "Mathematics", "Statistics", "R", "Data Analysis", "Research Methods",
            "Scientific Writing", "Laboratory Techniques", "Experimental Design", "Physics",
            "Chemistry", "Biology", "Environmental Science",
        ],
    ),
];

pub const JOB_ROLES: &[JobRole] = &[
    JobRole {
        name: "Full Stack Developer",
        category: "Computer Science & IT",
        skills: &["JavaScript", "React", "Node.js", "MongoDB", "Python", "AWS", "APIs", "SQL"],
    },
    JobRole {
        name: "Data Scientist",
        category: "Computer Science & IT",
        skills: &["Python", "Machine Learning", "SQL", "Statistics", "TensorFlow", "Data Analysis"],
    },
    JobRole {
        name: "Healthcare Software Engineer",
        category: "Healthcare & Life Sciences",
        skills: &["Python", "Healthcare", "EHR", "HIPAA", "APIs", "Medical Systems"],
    },
    JobRole {
        name: "Business Analyst",
        category: "Management & Business",
        skills: &["Data Analysis", "SQL", "Business Intelligence", "Project Management", "Reporting"],
    },
    JobRole {
        name: "Robotics Engineer",
        category: "Engineering & Industrial",
        skills: &["ROS", "Python", "C++", "Robotics", "Control Systems", "Sensors"],
    },
    JobRole {
        name: "Research Scientist",
        category: "Science & Research",
        skills: &["Python", "R", "Statistics", "Research Methods", "Data Analysis", "Scientific Writing"],
    },
];

/// Sorted, deduplicated union of every catalog skill.
pub fn all_skills() -> Vec<&'static str> {
    let mut skills: Vec<&'static str> = SKILL_CATEGORIES
        .iter()
        .flat_map(|(_, skills)| skills.iter().copied())
        .collect();
    skills.sort_unstable();
    skills.dedup();
    skills
}
