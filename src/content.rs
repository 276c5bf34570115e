//! Static résumé content rendered by the page.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Experience,
    Projects,
    Skills,
    Certificates,
    Education,
    Clubs,
    Contact,
}

impl Section {
    pub const NAV: [Section; 8] = [
        Self::About,
        Self::Experience,
        Self::Projects,
        Self::Skills,
        Self::Certificates,
        Self::Education,
        Self::Clubs,
        Self::Contact,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Certificates => "certificates",
            Self::Education => "education",
            Self::Clubs => "clubs",
            Self::Contact => "contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::NAV.into_iter().find(|section| section.id() == id)
    }

    pub fn href(self) -> String {
        format!("#{}", self.id())
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Experience => "Experience",
            Self::Projects => "Projects",
            Self::Skills => "Skills",
            Self::Certificates => "Certificates",
            Self::Education => "Education",
            Self::Clubs => "Clubs",
            Self::Contact => "Contact",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::About => "ABOUT ME",
            Self::Experience => "WORK EXPERIENCE",
            Self::Projects => "Projects",
            Self::Skills => "SKILLS",
            Self::Certificates => "CERTIFICATES",
            Self::Education => "EDUCATION",
            Self::Clubs => "CLUBS AND EXTRA CURRICULAR",
            Self::Contact => "CONTACT",
        }
    }
}

pub const OWNER_NAME: &str = "Veditha R";
pub const HERO_GREETING: &str = "Hi :) I'm Veditha";
pub const HERO_TAGLINE: &str = "a 20 year old exploring life";
pub const LOGO_ASSET: &str = "logo.svg";

pub const ABOUT: &str = "Computer Science student with experience in cloud computing, web development, and algorithms, skilled in GCP, Python, Flask, and SQLite. Interested in applying problem-solving and technical skills to cloud, software, and AI projects.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocialIcon {
    LinkedIn,
    GitHub,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: SocialIcon,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        label: "LinkedIn Profile",
        href: "https://www.linkedin.com/in/veditharv/",
        icon: SocialIcon::LinkedIn,
    },
    SocialLink {
        label: "GitHub Profile",
        href: "https://github.com/23f3004007",
        icon: SocialIcon::GitHub,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExperienceEntry {
    pub role: &'static str,
    pub organisation: &'static str,
    pub period: &'static str,
    pub summary: &'static str,
}

pub const EXPERIENCE: &[ExperienceEntry] = &[
    ExperienceEntry {
        role: "Summer Research Intern",
        organisation: "VIT Chennai",
        period: "May 2025 - July 2025",
        summary: "Conducted in-depth exploration of various LLMs and leveraged the knowledge to optimize data processing workflows and develop a chatbot with Hybrid RAG implementation, improving retrieval accuracy and response efficiency.",
    },
    ExperienceEntry {
        role: "Trainee + Intern",
        organisation: "LearnNex",
        period: "May 2024 - August 2024",
        summary: "Completed training and internship in Artificial Intelligence, successfully delivering two AIML capstone projects and gaining extensive hands-on experience in Python programming for building, training, and deploying machine learning models.",
    },
];

/// A card in the project carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub name: &'static str,
    /// Path relative to the public asset base.
    pub image: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        name: "Quiz Master",
        image: "projects/quiz-master.svg",
        description: "A Flask-based e-learning platform for quiz management and assessment across multiple subjects.",
        link: "https://github.com/23f3004007/quiz-master",
    },
    Project {
        name: "Parking Management System",
        image: "projects/parking-management.svg",
        description: "A Flask-based multi-user web application for managing parking lots, spots, and reservations.",
        link: "https://github.com/23f3004007/parking-management",
    },
];

pub const SKILLS: &[&str] = &[
    "Python",
    "C++/C",
    "Java",
    "JavaScript",
    "HTML/CSS",
    "Flask",
    "Jinja2",
    "SQL",
    "Bash",
    "DSA",
    "Algorithms",
    "LLMs",
    "GIT",
    "GCP",
    "AWS",
    "Event Management",
    "Graphic Design",
    "Leadership",
    "Figma",
    "Gen AI",
    "Digital Art",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CertificateEntry {
    pub title: &'static str,
    pub issuer: Option<&'static str>,
}

pub const CERTIFICATES: &[CertificateEntry] = &[
    CertificateEntry {
        title: "Advanced Certificate in Programming and Application Development",
        issuer: Some("IIT Madras"),
    },
    CertificateEntry {
        title: "Foundation level in programming and Data Science",
        issuer: Some("IIT Madras"),
    },
    CertificateEntry {
        title: "Internship and Training",
        issuer: Some("LearnNex"),
    },
    CertificateEntry {
        title: "Credly badges",
        issuer: None,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EducationEntry {
    pub institution: &'static str,
    pub programme: &'static str,
    pub score: &'static str,
}

pub const EDUCATION: &[EducationEntry] = &[
    EducationEntry {
        institution: "Vellore Institute of Technology, Chennai",
        programme: "Bachelor of Technology in Computer Science Engineering (2023-2027)",
        score: "CGPA: 9.02",
    },
    EducationEntry {
        institution: "Indian Institute of Technology, Madras",
        programme: "Bachelor of Science in Data Science and Applications (2023-Present)",
        score: "CGPA: 7.34",
    },
    EducationEntry {
        institution: "Sri Chaitanya Techno School, Bangalore",
        programme: "CBSE 12th Board (2021-2022)",
        score: "Percentage: 81%",
    },
    EducationEntry {
        institution: "Atomic Energy Central School, Kaiga",
        programme: "CBSE 10th Board (2019-2020)",
        score: "Percentage: 93.4%",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClubEntry {
    pub role: &'static str,
    pub details: &'static str,
}

pub const CLUBS: &[ClubEntry] = &[
    ClubEntry {
        role: "Graphic Designer",
        details: "Google Developers Group on Campus, Fraternity of Leaders, TedX VIT Chennai, Kannada Literary Association - VIT Chennai",
    },
    ClubEntry {
        role: "Basketball Player",
        details: "University team member and was the captain in highschool.",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Location,
    Phone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactDetail {
    pub kind: ContactKind,
    pub text: &'static str,
}

pub const CONTACT_DETAILS: &[ContactDetail] = &[
    ContactDetail {
        kind: ContactKind::Email,
        text: "veditharv@gmail.com",
    },
    ContactDetail {
        kind: ContactKind::Location,
        text: "Bangalore, Karnataka",
    },
    ContactDetail {
        kind: ContactKind::Phone,
        text: "+91 7837830532",
    },
];

/// Fields posted to the contact relay, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }

    /// `None` means the field renders as a `<textarea>`.
    pub fn input_type(self) -> Option<&'static str> {
        match self {
            Self::Name => Some("text"),
            Self::Email => Some("email"),
            Self::Message => None,
        }
    }

    pub fn autocomplete(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "off",
        }
    }
}

pub const FOOTER_NOTICE: &str = "© 2025 Veditha R. All Rights Reserved.";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use url::Url;

    #[test]
    fn nav_ids_are_unique_and_round_trip() {
        let ids: HashSet<&str> = Section::NAV.iter().map(|section| section.id()).collect();
        assert_eq!(ids.len(), Section::NAV.len());

        for section in Section::NAV {
            assert_eq!(Section::from_id(section.id()), Some(section));
            assert_eq!(section.href(), format!("#{}", section.id()));
        }
        assert_eq!(Section::from_id("hero"), None);
    }

    #[test]
    fn project_links_are_absolute_https() {
        assert!(!PROJECTS.is_empty());

        for project in PROJECTS {
            let link = Url::parse(project.link).expect("project link parses");
            assert_eq!(link.scheme(), "https", "{} link", project.name);
            assert!(!project.image.starts_with('/'), "{} image is relative", project.name);
        }
    }

    #[test]
    fn project_names_are_unique() {
        let names: HashSet<&str> = PROJECTS.iter().map(|project| project.name).collect();
        assert_eq!(names.len(), PROJECTS.len());
    }

    #[test]
    fn contact_form_posts_three_distinct_fields() {
        let names: Vec<&str> = ContactField::ALL.iter().map(|field| field.name()).collect();
        assert_eq!(names, ["name", "email", "message"]);
        assert_eq!(ContactField::Message.input_type(), None);
        assert_eq!(ContactField::Email.input_type(), Some("email"));
    }

    #[test]
    fn social_links_parse() {
        for link in SOCIAL_LINKS {
            assert!(Url::parse(link.href).is_ok(), "{}", link.label);
        }
    }
}
