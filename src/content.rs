//! Static page copy: skills, projects and contact details.

pub const OWNER_NAME: &str = "Mayur";
pub const OWNER_ROLE: &str = "Front-end Developer";
pub const CONTACT_EMAIL: &str = "mayurbhaliya32@gmail.com";
pub const LOCATION: &str = "Surat, Gujarat, India";
pub const GITHUB_URL: &str = "https://github.com/Mayur172002";
pub const LINKEDIN_URL: &str = "https://www.linkedin.com/in/mayur-bhaliya-530004289/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillEntry {
    pub name: &'static str,
    pub level: u8,
    pub glyph: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectEntry {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub tech: [&'static str; 4],
    pub live_url: &'static str,
    pub source_url: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub value: &'static str,
    pub label: &'static str,
}

pub const ABOUT_PARAGRAPHS: [&str; 3] = [
    "I'm a passionate front-end developer focused on building fast, responsive, and scalable web applications. I specialize in React, Next.js, TypeScript, and Redux Toolkit, creating clean, maintainable code and seamless user experiences.",
    "With strong skills in JavaScript, CSS/SCSS, Tailwind CSS, and MUI, I design consistent and visually appealing interfaces. I also use TanStack Query for efficient data fetching and Socket.IO for real-time features.",
    "Always eager to learn and improve, I stay up to date with modern tools and best practices, bringing a problem-solving mindset to every project I take on.",
];

pub const HIGHLIGHTS: [Highlight; 3] = [
    Highlight { value: "1+", label: "Years Experience" },
    Highlight { value: "5+", label: "Projects Completed" },
    Highlight { value: "100%", label: "Client Satisfaction" },
];

pub const SKILLS: [SkillEntry; 9] = [
    SkillEntry { name: "React", level: 95, glyph: "◎" },
    SkillEntry { name: "Next.js", level: 80, glyph: "➚" },
    SkillEntry { name: "TypeScript", level: 90, glyph: "⟨⟩" },
    SkillEntry { name: "Redux/Redux Toolkit", level: 85, glyph: "≡" },
    SkillEntry { name: "JavaScript", level: 88, glyph: "ϟ" },
    SkillEntry { name: "TanStack Query", level: 60, glyph: "⛁" },
    SkillEntry { name: "Socket.IO", level: 75, glyph: "⇄" },
    SkillEntry { name: "CSS/SCSS", level: 92, glyph: "✎" },
    SkillEntry { name: "Tailwind CSS/MUI", level: 95, glyph: "▦" },
];

pub const PROJECTS: [ProjectEntry; 6] = [
    ProjectEntry {
        id: 1,
        title: "3D Interactive Email Platform",
        description: "Advanced email platform with 3D animations and interactive elements using React and Three.js",
        image: "/images/projects/email-platform.png",
        tech: ["React", "Three.js", "GSAP", "TypeScript"],
        live_url: "#",
        source_url: "#",
    },
    ProjectEntry {
        id: 2,
        title: "Next-Level Gaming UI",
        description: "Modern gaming interface with advanced animations and real-time data visualization",
        image: "/images/projects/gaming-ui.png",
        tech: ["React", "GSAP", "WebGL", "Socket.IO"],
        live_url: "#",
        source_url: "#",
    },
    ProjectEntry {
        id: 3,
        title: "3D Portfolio Website",
        description: "Interactive portfolio with Spline 3D integration and smooth animations",
        image: "/images/projects/portfolio-3d.png",
        tech: ["React", "Spline", "GSAP", "Tailwind"],
        live_url: "#",
        source_url: "#",
    },
    ProjectEntry {
        id: 4,
        title: "Gaming Character Dashboard",
        description: "Interactive character selection and stats dashboard for gaming platforms",
        image: "/images/projects/character-dashboard.png",
        tech: ["React", "Three.js", "Framer Motion", "CSS3"],
        live_url: "#",
        source_url: "#",
    },
    ProjectEntry {
        id: 5,
        title: "Animation Tools Platform",
        description: "Professional platform for web animation tools and tutorials",
        image: "/images/projects/animation-tools.png",
        tech: ["React", "GSAP", "WebGL", "Node.js"],
        live_url: "#",
        source_url: "#",
    },
    ProjectEntry {
        id: 6,
        title: "Animated Portfolio Tutorial",
        description: "Step-by-step tutorial platform for creating animated portfolios",
        image: "/images/projects/portfolio-tutorial.png",
        tech: ["React", "GSAP", "Locomotive", "CSS3"],
        live_url: "#",
        source_url: "#",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn skill_levels_are_percentages() {
        assert!(SKILLS.iter().all(|skill| skill.level <= 100));
    }

    #[test]
    fn project_ids_are_unique() {
        let ids: HashSet<u32> = PROJECTS.iter().map(|project| project.id).collect();
        assert_eq!(ids.len(), PROJECTS.len());
    }
}
