//! Built-in catalog data: subscription plans, the feature matrix, sample
//! courses with their lesson quizzes and the default question bank.
//!
//! Each function builds a fresh owned value. Callers construct what they need
//! once at startup and pass it into the evaluator or resolver explicitly.

use crate::course::{Course, Lesson, LessonKind};
use crate::generator::{BankEntry, QuestionBank};
use crate::model::{
    AnswerValue, BillingInterval, Difficulty, FeatureMatrix, Question, QuestionKind, Quiz,
    SubscriptionPlan,
};

const BASIC_FEATURES: [&str; 3] = ["basic_chat", "community_access", "email_support"];

const PROFESSIONAL_FEATURES: [&str; 8] = [
    "unlimited_chat",
    "video_mentoring",
    "blockchain_verification",
    "premium_courses",
    "priority_support",
    "linkedin_integration",
    "resume_optimization",
    "career_roadmap",
];

const ENTERPRISE_FEATURES: [&str; 7] = [
    "unlimited_video",
    "live_sessions",
    "custom_paths",
    "team_tools",
    "api_access",
    "white_label",
    "success_manager",
];

/// Capability tokens per plan tier. Each tier includes the one below it.
pub fn default_feature_matrix() -> FeatureMatrix {
    let professional: Vec<&str> = BASIC_FEATURES
        .iter()
        .chain(PROFESSIONAL_FEATURES.iter())
        .copied()
        .collect();
    let enterprise: Vec<&str> = professional
        .iter()
        .chain(ENTERPRISE_FEATURES.iter())
        .copied()
        .collect();

    FeatureMatrix::new()
        .with_plan("basic", BASIC_FEATURES)
        .with_plan("professional", professional.clone())
        .with_plan("professional_yearly", professional)
        .with_plan("enterprise", enterprise.clone())
        .with_plan("enterprise_yearly", enterprise)
}

fn plan(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    interval: BillingInterval,
    price_id: &str,
    features: &[&str],
) -> SubscriptionPlan {
    SubscriptionPlan {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        price,
        interval,
        features: features.iter().map(|f| f.to_string()).collect(),
        price_id: price_id.into(),
        popular: false,
    }
}

/// The subscription plans offered on the pricing page.
pub fn default_plans() -> Vec<SubscriptionPlan> {
    let mut professional = plan(
        "professional",
        "Professional",
        "Advanced AI mentoring with video responses",
        29.0,
        BillingInterval::Month,
        "price_professional_monthly",
        &[
            "Unlimited AI chat sessions",
            "60 minutes video mentoring",
            "Blockchain skill verification",
            "Premium course library",
            "Priority support",
            "LinkedIn integration",
            "Resume optimization AI",
            "Career roadmap planning",
        ],
    );
    professional.popular = true;

    vec![
        plan(
            "basic",
            "Basic",
            "Perfect for getting started with AI career coaching",
            0.0,
            BillingInterval::Month,
            "",
            &[
                "5 AI chat sessions per month",
                "Basic skill assessments",
                "Community forums access",
                "Email support",
                "Mobile app access",
            ],
        ),
        professional,
        plan(
            "professional_yearly",
            "Professional",
            "Advanced AI mentoring with video responses (Yearly)",
            290.0,
            BillingInterval::Year,
            "price_professional_yearly",
            &[
                "Everything in Professional",
                "2 months free (17% savings)",
                "Annual career review session",
                "Exclusive yearly webinars",
            ],
        ),
        plan(
            "enterprise",
            "Enterprise",
            "Complete career transformation with 1:1 sessions",
            99.0,
            BillingInterval::Month,
            "price_enterprise_monthly",
            &[
                "Everything in Professional",
                "Unlimited video mentoring",
                "2 live 1:1 mentor sessions",
                "Custom learning paths",
                "Team collaboration tools",
                "API access",
                "White-label options",
                "Dedicated success manager",
                "Custom integrations",
            ],
        ),
        plan(
            "enterprise_yearly",
            "Enterprise",
            "Complete career transformation with 1:1 sessions (Yearly)",
            990.0,
            BillingInterval::Year,
            "price_enterprise_yearly",
            &[
                "Everything in Enterprise",
                "2 months free (17% savings)",
                "Quarterly strategy sessions",
                "Priority feature requests",
            ],
        ),
    ]
}

fn choice(
    id: &str,
    prompt: &str,
    options: &[&str],
    correct: usize,
    explanation: &str,
    difficulty: Difficulty,
    topic: &str,
) -> Question {
    Question {
        id: id.into(),
        kind: QuestionKind::MultipleChoice,
        prompt: prompt.into(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: AnswerValue::Index(correct),
        explanation: explanation.into(),
        difficulty,
        topic: topic.into(),
        points: difficulty.default_points(),
    }
}

/// The lesson quizzes bundled with the sample courses.
pub fn sample_quizzes() -> Vec<Quiz> {
    let ml = "machine learning";
    let devops = "devops";

    vec![
        Quiz {
            id: "ml-quiz-1".into(),
            title: "Machine Learning Fundamentals".into(),
            description: "Check your understanding of core machine learning ideas".into(),
            course_id: Some("ml-certification".into()),
            lesson_id: Some("ml-quiz-1".into()),
            questions: vec![
                choice(
                    "q1",
                    "What is the main goal of supervised learning?",
                    &[
                        "To learn from labeled training data to make predictions",
                        "To find hidden patterns in unlabeled data",
                        "To maximize rewards through trial and error",
                        "To reduce the dimensionality of data",
                    ],
                    0,
                    "Supervised learning uses labeled training data to learn a mapping function that can make predictions on new, unseen data.",
                    Difficulty::Easy,
                    ml,
                ),
                choice(
                    "q2",
                    "Which of the following is an example of unsupervised learning?",
                    &[
                        "Email spam detection",
                        "Customer segmentation",
                        "House price prediction",
                        "Image classification",
                    ],
                    1,
                    "Customer segmentation is unsupervised learning because it finds patterns in customer data without predefined labels.",
                    Difficulty::Medium,
                    ml,
                ),
                choice(
                    "q3",
                    "What does overfitting mean in machine learning?",
                    &[
                        "The model is too simple to capture patterns",
                        "The model performs well on training data but poorly on test data",
                        "The model has too few parameters",
                        "The model trains too quickly",
                    ],
                    1,
                    "Overfitting occurs when a model learns the training data too well, including noise, making it perform poorly on new data.",
                    Difficulty::Medium,
                    ml,
                ),
                choice(
                    "q4",
                    "Which algorithm is best for linear relationships?",
                    &[
                        "Decision Tree",
                        "K-Means Clustering",
                        "Linear Regression",
                        "Neural Networks",
                    ],
                    2,
                    "Linear Regression is specifically designed to model linear relationships between variables.",
                    Difficulty::Easy,
                    ml,
                ),
                choice(
                    "q5",
                    "What is cross-validation used for?",
                    &[
                        "To increase training speed",
                        "To assess model performance and prevent overfitting",
                        "To reduce data size",
                        "To visualize data",
                    ],
                    1,
                    "Cross-validation helps assess how well a model will generalize to independent data and helps detect overfitting.",
                    Difficulty::Hard,
                    ml,
                ),
            ],
            passing_score: 70,
            time_limit_secs: Some(600),
            max_attempts: Some(3),
        },
        Quiz {
            id: "devops-quiz-1".into(),
            title: "DevOps Essentials".into(),
            description: "Continuous delivery and version control basics".into(),
            course_id: Some("devops-mastery".into()),
            lesson_id: Some("devops-quiz-1".into()),
            questions: vec![
                choice(
                    "q1",
                    "What does CI/CD stand for?",
                    &[
                        "Continuous Integration/Continuous Deployment",
                        "Code Integration/Code Deployment",
                        "Continuous Improvement/Continuous Development",
                        "Central Integration/Central Deployment",
                    ],
                    0,
                    "CI/CD stands for Continuous Integration and Continuous Deployment, key practices in modern software development.",
                    Difficulty::Easy,
                    devops,
                ),
                choice(
                    "q2",
                    "Which Git command is used to merge branches?",
                    &["git combine", "git merge", "git join", "git unite"],
                    1,
                    "The git merge command is used to integrate changes from one branch into another.",
                    Difficulty::Easy,
                    devops,
                ),
                choice(
                    "q3",
                    "What is the purpose of a staging environment?",
                    &[
                        "To store code permanently",
                        "To test applications before production deployment",
                        "To backup production data",
                        "To develop new features",
                    ],
                    1,
                    "A staging environment mimics production to test applications before they go live.",
                    Difficulty::Medium,
                    devops,
                ),
            ],
            passing_score: 70,
            time_limit_secs: Some(600),
            max_attempts: Some(3),
        },
    ]
}

/// Look up a bundled quiz by id.
pub fn sample_quiz(id: &str) -> Option<Quiz> {
    sample_quizzes().into_iter().find(|q| q.id == id)
}

/// The sample courses. Each quiz lesson id matches a quiz in
/// [`sample_quizzes`].
pub fn sample_courses() -> Vec<Course> {
    let mut ml = Course::new(
        "ml-certification",
        "AI-Powered Machine Learning Certification",
        "ML Certified Professional",
        vec![
            Lesson::new("ml-intro", "Introduction to Machine Learning", LessonKind::Video, 15),
            Lesson::new("ml-types", "Types of Machine Learning", LessonKind::Video, 20),
            Lesson::new("ml-quiz-1", "Knowledge Check: ML Fundamentals", LessonKind::Quiz, 10),
            Lesson::new("linear-regression", "Linear Regression Deep Dive", LessonKind::Video, 25),
            Lesson::new("decision-trees", "Decision Trees & Random Forests", LessonKind::Video, 30),
            Lesson::new("ml-project-overview", "ML Project Walkthrough", LessonKind::Video, 35),
            Lesson::new("pandas-tutorial", "Pandas DataFrame Tutorial", LessonKind::Colab, 45),
            Lesson::new("house-price-project", "House Price Prediction Project", LessonKind::Project, 120),
            Lesson::new("intro-pandas", "Introduction to Pandas", LessonKind::Colab, 60),
            Lesson::new("diabetes-prediction", "Diabetes Prediction Project", LessonKind::Colab, 90),
            Lesson::new("titanic-tutorial", "Titanic Survival Prediction", LessonKind::External, 120),
            Lesson::new("fastai-course", "Fast.ai Practical Deep Learning", LessonKind::External, 600),
            Lesson::new("fastai-github", "Fast.ai Course Materials", LessonKind::External, 300),
            Lesson::new("huggingface-transformers", "Hugging Face Transformers Tutorial", LessonKind::Colab, 75),
        ],
    );
    ml.description = "Learn ML, earn blockchain badges, and get career-ready".into();

    let mut devops = Course::new(
        "devops-mastery",
        "DevOps Engineering Mastery",
        "DevOps Engineer Certified",
        vec![
            Lesson::new("devops-intro", "DevOps Culture and Principles", LessonKind::Video, 18),
            Lesson::new("git-advanced", "Advanced Git Workflows", LessonKind::Video, 22),
            Lesson::new("devops-quiz-1", "Git Workflow Assessment", LessonKind::Quiz, 8),
        ],
    );
    devops.description = "Master CI/CD, Docker, Kubernetes, and cloud deployment".into();

    vec![ml, devops]
}

pub fn sample_course(id: &str) -> Option<Course> {
    sample_courses().into_iter().find(|c| c.id == id)
}

fn entry(
    topic: &str,
    kind: QuestionKind,
    difficulty: Option<Difficulty>,
    prompt: &str,
    options: &[&str],
    correct_answer: AnswerValue,
    explanation: &str,
) -> BankEntry {
    BankEntry {
        topic: topic.into(),
        kind,
        difficulty,
        prompt: prompt.into(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
        explanation: explanation.into(),
    }
}

/// Template questions used to generate adaptive quizzes.
pub fn default_question_bank() -> QuestionBank {
    let ml = "machine learning";

    QuestionBank::new(
        ml,
        vec![
            entry(
                ml,
                QuestionKind::MultipleChoice,
                Some(Difficulty::Easy),
                "What is the main goal of supervised learning?",
                &[
                    "To learn from labeled training data to make predictions",
                    "To find hidden patterns in unlabeled data",
                    "To maximize rewards through trial and error",
                    "To reduce the dimensionality of data",
                ],
                AnswerValue::Index(0),
                "Supervised learning uses labeled training data to learn a mapping function that can make predictions on new, unseen data.",
            ),
            entry(
                ml,
                QuestionKind::MultipleChoice,
                Some(Difficulty::Medium),
                "Which algorithm is best suited for handling non-linear relationships in data?",
                &[
                    "Linear Regression",
                    "Logistic Regression",
                    "Random Forest",
                    "K-Means Clustering",
                ],
                AnswerValue::Index(2),
                "Random Forest can capture non-linear relationships through its ensemble of decision trees, making it more flexible than linear models.",
            ),
            entry(
                "devops",
                QuestionKind::MultipleChoice,
                Some(Difficulty::Easy),
                "What does CI/CD stand for?",
                &[
                    "Continuous Integration/Continuous Deployment",
                    "Code Integration/Code Deployment",
                    "Continuous Improvement/Continuous Development",
                    "Central Integration/Central Deployment",
                ],
                AnswerValue::Index(0),
                "CI/CD stands for Continuous Integration and Continuous Deployment, key practices in modern software development.",
            ),
            entry(
                ml,
                QuestionKind::TrueFalse,
                None,
                "True or False: Overfitting occurs when a model performs well on training data but poorly on test data.",
                &["True", "False"],
                AnswerValue::Index(0),
                "Overfitting happens when a model learns the training data too well, including noise, making it perform poorly on new data.",
            ),
            entry(
                ml,
                QuestionKind::TrueFalse,
                None,
                "True or False: Deep learning always outperforms traditional machine learning algorithms.",
                &["True", "False"],
                AnswerValue::Index(1),
                "Deep learning excels with large datasets and complex patterns, but traditional ML can be better for smaller datasets or simpler problems.",
            ),
            entry(
                ml,
                QuestionKind::FillBlank,
                None,
                "The process of splitting data into training and testing sets is called _____ validation.",
                &[],
                AnswerValue::Text("cross".into()),
                "Cross-validation is a technique used to assess how well a model will generalize to an independent dataset.",
            ),
            entry(
                ml,
                QuestionKind::CodeCompletion,
                None,
                "Complete the code to split data into training and testing sets:\n\n```python\nfrom sklearn.model_selection import train_test_split\nX_train, X_test, y_train, y_test = train_test_split(X, y, ___=0.2)\n```",
                &["test_size", "train_size", "split_ratio", "validation_size"],
                AnswerValue::Index(0),
                "The test_size parameter specifies the proportion of the dataset to include in the test split.",
            ),
        ],
    )
}
