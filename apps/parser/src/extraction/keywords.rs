//! Keyword dictionaries consumed by the extractors.
//!
//! All tables are immutable `'static` data bundled into [`Dictionaries`], which
//! is handed to each component at construction. Nothing here is mutated at
//! runtime.

use serde::Serialize;

/// Skill categories in output priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Languages,
    Frameworks,
    Databases,
    Cloud,
    Web,
    DataScience,
    Testing,
    SoftSkills,
    Other,
}

/// Role nouns and seniority words that mark a job title.
const JOB_TITLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "programmer",
    "architect",
    "manager",
    "director",
    "analyst",
    "consultant",
    "designer",
    "scientist",
    "specialist",
    "administrator",
    "coordinator",
    "intern",
    "internship",
    "lead",
    "head",
    "officer",
    "president",
    "vp",
    "founder",
    "co-founder",
    "cofounder",
    "executive",
    "associate",
    "assistant",
    "technician",
    "researcher",
    "strategist",
    "representative",
    "supervisor",
    "contractor",
    "freelancer",
    "editor",
    "writer",
    "accountant",
    "teacher",
    "instructor",
    "tutor",
    "recruiter",
    "sre",
    "cto",
    "ceo",
    "cfo",
    "coo",
    "senior",
    "sr",
    "junior",
    "jr",
    "principal",
    "staff",
    "chief",
];

/// Domain modifiers that only make sense inside a position, used together
/// with the job title keywords when splitting a name from a title.
const POSITION_MODIFIERS: &[&str] = &[
    "software",
    "web",
    "mobile",
    "data",
    "frontend",
    "front-end",
    "backend",
    "back-end",
    "fullstack",
    "full-stack",
    "devops",
    "ios",
    "android",
    "cloud",
    "ml",
    "ai",
    "ui",
    "ux",
    "ui/ux",
    "qa",
    "product",
    "marketing",
    "sales",
    "security",
    "network",
    "systems",
    "embedded",
    "game",
    "platform",
    "infrastructure",
    "machine",
    "learning",
    "graphic",
    "technical",
];

const BIG_COMPANIES: &[&str] = &[
    "google",
    "microsoft",
    "amazon",
    "apple",
    "meta",
    "facebook",
    "netflix",
    "ibm",
    "oracle",
    "intel",
    "salesforce",
    "adobe",
    "uber",
    "airbnb",
    "twitter",
    "linkedin",
    "nvidia",
    "tesla",
    "spotify",
    "stripe",
    "shopify",
    "accenture",
    "deloitte",
    "infosys",
    "tcs",
    "wipro",
    "cognizant",
    "capgemini",
    "samsung",
    "cisco",
    "sap",
    "paypal",
    "dell",
    "hp",
];

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "employment",
    "work history",
    "professional background",
    "career history",
    "responsibilities",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "university",
    "college",
    "degree",
    "bachelor",
    "master",
    "phd",
    "academic",
];

const SKILLS_KEYWORDS: &[&str] = &[
    "skills",
    "technologies",
    "proficient",
    "competencies",
    "expertise",
    "tech stack",
];

/// Words never title-cased inside a multi-word skill.
const CONNECTOR_WORDS: &[&str] = &["of", "the", "and", "in", "on", "with", "for", "a", "an", "to"];

/// Tokens that show up in skill lists but are not skills.
const NON_SKILL_WORDS: &[&str] = &[
    "and", "the", "of", "in", "for", "with", "on", "at", "by", "to", "a", "an", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "should", "can", "could", "may", "might", "must", "shall", "using", "leveraging",
    "improving", "creating", "developing", "building", "working", "implementing", "skills",
    "proficient", "experienced", "knowledgeable", "familiar", "etc",
];

/// Canonical technical spelling followed by lowercase aliases.
const TECH_TERMS: &[(&str, &[&str])] = &[
    ("JavaScript", &["js", "java script", "ecmascript"]),
    ("TypeScript", &["ts"]),
    ("Python", &["python3"]),
    ("Java", &[]),
    ("Go", &["golang"]),
    ("Rust", &[]),
    ("C++", &["cpp"]),
    ("C#", &["csharp", "c-sharp"]),
    ("C", &[]),
    ("R", &[]),
    ("Ruby", &[]),
    ("PHP", &[]),
    ("Swift", &[]),
    ("Kotlin", &[]),
    ("Scala", &[]),
    ("SQL", &[]),
    ("Bash", &[]),
    ("Dart", &[]),
    ("Node.js", &["nodejs", "node-js", "node js", "node"]),
    ("React", &["reactjs", "react-js", "react.js", "react js"]),
    (
        "React Native",
        &["react-native", "reactnative", "expo-react-native", "exporeactnative"],
    ),
    ("Vue", &["vuejs", "vue-js", "vue.js"]),
    ("Angular", &["angularjs", "angular-js", "angular.js"]),
    ("Express", &["expressjs", "express-js", "express.js"]),
    ("Next.js", &["nextjs", "next-js"]),
    ("Django", &[]),
    ("Flask", &[]),
    ("FastAPI", &["fast-api"]),
    ("Python FastAPI", &["python-fastapi", "pythonfastapi"]),
    ("Spring Boot", &["spring-boot", "springboot"]),
    ("Java Spring", &["java-spring", "javaspring"]),
    ("Ruby on Rails", &["rails", "ror"]),
    (".NET", &["dotnet"]),
    ("Flutter", &[]),
    ("jQuery", &[]),
    ("Redux", &[]),
    ("Tailwind CSS", &["tailwind", "tailwindcss"]),
    ("PostgreSQL", &["postgres", "psql"]),
    ("MySQL", &[]),
    ("MongoDB", &["mongo"]),
    ("MariaDB", &[]),
    ("SQLite", &[]),
    ("Redis", &[]),
    ("NoSQL", &[]),
    ("DynamoDB", &[]),
    ("Elasticsearch", &[]),
    ("Firebase", &[]),
    ("AWS", &["amazon web services"]),
    ("GCP", &["google cloud", "google cloud platform"]),
    ("Azure", &["microsoft azure"]),
    ("Docker", &[]),
    ("Kubernetes", &["k8s"]),
    ("Terraform", &[]),
    ("CI/CD", &["cicd", "ci-cd"]),
    ("DevOps", &["dev-ops"]),
    ("Jenkins", &[]),
    ("Linux", &[]),
    ("Git", &[]),
    ("GitHub", &[]),
    ("GitLab", &[]),
    ("Bitbucket", &[]),
    ("HTML", &["html5"]),
    ("CSS", &["css3"]),
    ("REST", &[]),
    ("REST API", &["rest-api", "restapi", "rest apis"]),
    ("RESTful", &[]),
    ("RESTful API", &["restful-api"]),
    ("GraphQL", &[]),
    ("Sass", &["scss"]),
    ("Webpack", &[]),
    ("Machine Learning", &["machine-learning", "machinelearning", "ml"]),
    ("Deep Learning", &["deep-learning", "deeplearning"]),
    ("Data Science", &["data-science", "datascience"]),
    ("TensorFlow", &[]),
    ("PyTorch", &[]),
    ("Pandas", &[]),
    ("NumPy", &[]),
    ("scikit-learn", &["sklearn", "scikit learn"]),
    ("NLP", &["natural language processing"]),
    ("Tableau", &[]),
    ("Power BI", &["powerbi"]),
    ("Apache Spark", &["spark", "pyspark"]),
    ("Jest", &[]),
    ("Pytest", &[]),
    ("JUnit", &[]),
    ("Selenium", &[]),
    ("Cypress", &[]),
    ("Mocha", &[]),
    ("Playwright", &[]),
    ("Unit Testing", &["unit tests"]),
    ("TDD", &["test-driven development", "test driven development"]),
    ("Agile", &[]),
    ("Scrum", &[]),
];

/// Category membership by canonical (or title-cased) skill name.
const SKILL_CATEGORIES: &[(SkillCategory, &[&str])] = &[
    (
        SkillCategory::Languages,
        &[
            "javascript", "typescript", "python", "java", "go", "rust", "c++", "c#", "c", "r",
            "ruby", "php", "swift", "kotlin", "scala", "sql", "bash", "dart", "perl", "matlab",
            "haskell", "elixir", "lua", "objective-c", "shell",
        ],
    ),
    (
        SkillCategory::Frameworks,
        &[
            "react", "react native", "node.js", "vue", "angular", "svelte", "express", "next.js",
            "django", "flask", "fastapi", "python fastapi", "spring", "spring boot", "java spring",
            "ruby on rails", "laravel", ".net", "asp.net", "flutter", "jquery", "redux",
            "tailwind css", "bootstrap", "nestjs", "tokio", "actix", "axum",
        ],
    ),
    (
        SkillCategory::Databases,
        &[
            "postgresql", "mysql", "mongodb", "mariadb", "sqlite", "redis", "nosql", "dynamodb",
            "elasticsearch", "firebase", "cassandra", "oracle", "neo4j", "supabase",
        ],
    ),
    (
        SkillCategory::Cloud,
        &[
            "aws", "gcp", "azure", "docker", "kubernetes", "terraform", "ci/cd", "devops",
            "jenkins", "linux", "git", "github", "gitlab", "bitbucket", "heroku", "vercel",
            "netlify", "ansible",
        ],
    ),
    (
        SkillCategory::Web,
        &[
            "html", "css", "rest", "rest api", "restful", "restful api", "graphql", "sass",
            "webpack", "websockets", "json", "ajax", "responsive design",
        ],
    ),
    (
        SkillCategory::DataScience,
        &[
            "machine learning", "deep learning", "data science", "tensorflow", "pytorch",
            "pandas", "numpy", "scikit-learn", "nlp", "tableau", "power bi", "apache spark",
            "keras", "computer vision", "data analysis", "hadoop", "jupyter", "matplotlib",
        ],
    ),
    (
        SkillCategory::Testing,
        &[
            "jest", "pytest", "junit", "selenium", "cypress", "mocha", "playwright",
            "unit testing", "tdd", "integration testing",
        ],
    ),
    (
        SkillCategory::SoftSkills,
        &[
            "leadership", "communication", "teamwork", "problem solving", "problem-solving",
            "time management", "collaboration", "critical thinking", "mentoring", "agile",
            "scrum", "project management",
        ],
    ),
];

// ────────────────────────────────────────────────────────────────────────────
// Injected dictionary bundle
// ────────────────────────────────────────────────────────────────────────────

/// Immutable keyword configuration shared by every extractor.
#[derive(Debug, Clone, Copy)]
pub struct Dictionaries {
    pub job_titles: &'static [&'static str],
    pub position_modifiers: &'static [&'static str],
    pub big_companies: &'static [&'static str],
    pub experience_keywords: &'static [&'static str],
    pub education_keywords: &'static [&'static str],
    pub skills_keywords: &'static [&'static str],
    pub connector_words: &'static [&'static str],
    pub non_skill_words: &'static [&'static str],
    pub tech_terms: &'static [(&'static str, &'static [&'static str])],
    pub skill_categories: &'static [(SkillCategory, &'static [&'static str])],
}

pub const BUILTIN_DICTIONARIES: Dictionaries = Dictionaries {
    job_titles: JOB_TITLE_KEYWORDS,
    position_modifiers: POSITION_MODIFIERS,
    big_companies: BIG_COMPANIES,
    experience_keywords: EXPERIENCE_KEYWORDS,
    education_keywords: EDUCATION_KEYWORDS,
    skills_keywords: SKILLS_KEYWORDS,
    connector_words: CONNECTOR_WORDS,
    non_skill_words: NON_SKILL_WORDS,
    tech_terms: TECH_TERMS,
    skill_categories: SKILL_CATEGORIES,
};

impl Default for Dictionaries {
    fn default() -> Self {
        BUILTIN_DICTIONARIES
    }
}

/// Lowercases a token and strips surrounding punctuation, keeping inner
/// `-`, `/`, `.`, `+` and `#`.
pub fn normalize_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .to_lowercase()
}

impl Dictionaries {
    pub fn is_job_title(&self, token: &str) -> bool {
        let token = normalize_token(token);
        self.job_titles.contains(&token.as_str())
    }

    /// Job title keyword or position modifier.
    pub fn is_position_keyword(&self, token: &str) -> bool {
        let token = normalize_token(token);
        self.job_titles.contains(&token.as_str()) || self.position_modifiers.contains(&token.as_str())
    }

    /// True if any of the first `window` tokens of `line` is a job title keyword.
    pub fn line_has_title(&self, line: &str, window: usize) -> bool {
        line.split_whitespace()
            .take(window)
            .flat_map(|t| t.split('/'))
            .any(|t| self.is_job_title(t))
    }

    pub fn is_big_company(&self, token: &str) -> bool {
        let token = normalize_token(token);
        self.big_companies.contains(&token.as_str())
    }

    pub fn is_connector(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.connector_words.contains(&word.as_str())
    }

    pub fn is_non_skill(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.non_skill_words.contains(&token.as_str())
    }

    /// Canonical spelling for a known technical term.
    ///
    /// Matches the lowercase token, then its space/hyphen variants, against
    /// each canonical name and its aliases. Canonical names map to
    /// themselves.
    pub fn canonical_term(&self, token: &str) -> Option<&'static str> {
        let lower = token.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        let variants = [
            lower.clone(),
            lower.replace(' ', "-"),
            lower.replace('-', " "),
        ];
        variants.iter().find_map(|key| {
            self.tech_terms.iter().find_map(|(canonical, aliases)| {
                if canonical.to_lowercase() == *key || aliases.contains(&key.as_str()) {
                    Some(*canonical)
                } else {
                    None
                }
            })
        })
    }

    pub fn skill_category(&self, skill: &str) -> SkillCategory {
        let lower = skill.to_lowercase();
        self.skill_categories
            .iter()
            .find(|(_, names)| names.contains(&lower.as_str()))
            .map(|(category, _)| *category)
            .unwrap_or(SkillCategory::Other)
    }

    pub fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| text_lower.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_term_aliases() {
        let dict = Dictionaries::default();
        assert_eq!(dict.canonical_term("nodejs"), Some("Node.js"));
        assert_eq!(dict.canonical_term("node-js"), Some("Node.js"));
        assert_eq!(dict.canonical_term("node.js"), Some("Node.js"));
        assert_eq!(dict.canonical_term("Machine learning"), Some("Machine Learning"));
        assert_eq!(dict.canonical_term("rest api"), Some("REST API"));
        assert_eq!(dict.canonical_term("ci-cd"), Some("CI/CD"));
        assert_eq!(dict.canonical_term("Tokio"), None);
    }

    #[test]
    fn test_every_canonical_term_maps_to_itself() {
        let dict = Dictionaries::default();
        for (canonical, _) in dict.tech_terms {
            assert_eq!(dict.canonical_term(canonical), Some(*canonical), "{canonical}");
        }
    }

    #[test]
    fn test_every_canonical_term_is_categorized() {
        let dict = Dictionaries::default();
        for (canonical, _) in dict.tech_terms {
            assert_ne!(
                dict.skill_category(canonical),
                SkillCategory::Other,
                "{canonical} has no category"
            );
        }
    }

    #[test]
    fn test_category_priority_order() {
        assert!(SkillCategory::Languages < SkillCategory::Frameworks);
        assert!(SkillCategory::Cloud < SkillCategory::Web);
        assert!(SkillCategory::SoftSkills < SkillCategory::Other);
    }

    #[test]
    fn test_line_has_title() {
        let dict = Dictionaries::default();
        assert!(dict.line_has_title("Senior Software Engineer", 5));
        assert!(dict.line_has_title("Sr. Developer, Platform", 5));
        assert!(!dict.line_has_title("Acme Corp", 5));
        assert!(!dict.line_has_title("Mentored four engineers", 5));
    }

    #[test]
    fn test_normalize_token_keeps_inner_symbols() {
        assert_eq!(normalize_token("(C++),"), "c++");
        assert_eq!(normalize_token("Sr."), "sr");
        assert_eq!(normalize_token("UI/UX"), "ui/ux");
    }

    #[test]
    fn test_position_keyword_includes_modifiers() {
        let dict = Dictionaries::default();
        assert!(dict.is_position_keyword("Fullstack"));
        assert!(dict.is_position_keyword("Developer"));
        assert!(!dict.is_position_keyword("Jane"));
    }
}
