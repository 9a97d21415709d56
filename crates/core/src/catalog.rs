//! Built-in lesson content: the learning path, the searchable lesson corpus,
//! one knowledge-check quiz per module and the price-impact simulator table.

use serde::Serialize;

use crate::model::{LearningModule, LessonEntry, Level, ModuleId};
use crate::quiz::{Question, Quiz};

/// Page label given to bookmarks saved straight from search results.
pub const SEARCH_RESULTS_PAGE: &str = "Search Results";

/// Suggested queries offered next to the search box.
pub const POPULAR_SEARCHES: [&str; 12] = [
    "stock definition",
    "IPO",
    "supply demand",
    "market index",
    "coffee matcha",
    "beauty basket",
    "ETF",
    "volatility",
    "primary market",
    "secondary market",
    "NYSE",
    "Nifty 50",
];

/// Immutable content shared by every session.
#[derive(Debug, Clone)]
pub struct Catalog {
    modules: Vec<LearningModule>,
    lessons: Vec<LessonEntry>,
    quizzes: Vec<Quiz>,
}

impl Catalog {
    #[must_use]
    pub fn new(modules: Vec<LearningModule>, lessons: Vec<LessonEntry>, quizzes: Vec<Quiz>) -> Self {
        Self {
            modules,
            lessons,
            quizzes,
        }
    }

    /// The stock-market course as shipped.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_modules(), builtin_lessons(), builtin_quizzes())
    }

    /// Modules in learning-path order.
    #[must_use]
    pub fn modules(&self) -> &[LearningModule] {
        &self.modules
    }

    #[must_use]
    pub fn lessons(&self) -> &[LessonEntry] {
        &self.lessons
    }

    #[must_use]
    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn module_ids(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.iter().map(|m| &m.id)
    }

    #[must_use]
    pub fn module(&self, id: &ModuleId) -> Option<&LearningModule> {
        self.modules.iter().find(|m| &m.id == id)
    }

    /// Where a page label navigates to, if it belongs to a module.
    #[must_use]
    pub fn module_for_page(&self, page: &str) -> Option<&LearningModule> {
        self.modules.iter().find(|m| m.page == page)
    }

    #[must_use]
    pub fn quiz_for(&self, module: &ModuleId) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| &q.module == module)
    }

    pub fn modules_at(&self, level: Level) -> impl Iterator<Item = &LearningModule> {
        self.modules.iter().filter(move |m| m.level == level)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

//
// ─── MODULES ───────────────────────────────────────────────────────────────────
//

const WHAT_IS_A_STOCK: &str = "what-is-a-stock";
const WHY_GO_PUBLIC: &str = "why-companies-go-public";
const WHERE_TO_BUY: &str = "where-to-buy-stocks";
const STOCK_EXCHANGES: &str = "stock-exchanges";
const STOCK_PRICING: &str = "stock-pricing";
const MARKET_ANALOGIES: &str = "market-analogies";
const MARKET_INDICES: &str = "market-indices";

fn module(id: &'static str, title: &str, level: Level) -> LearningModule {
    LearningModule {
        id: ModuleId::from_static(id),
        title: title.to_string(),
        page: title.to_string(),
        level,
    }
}

fn builtin_modules() -> Vec<LearningModule> {
    vec![
        module(WHAT_IS_A_STOCK, "What is a Stock", Level::Beginner),
        module(WHY_GO_PUBLIC, "Why Companies Go Public", Level::Beginner),
        module(WHERE_TO_BUY, "Where to Buy Stocks", Level::Beginner),
        module(STOCK_EXCHANGES, "Stock Exchanges", Level::Intermediate),
        module(STOCK_PRICING, "Stock Pricing", Level::Intermediate),
        module(MARKET_ANALOGIES, "Market Analogies", Level::Fun),
        module(MARKET_INDICES, "Market Indices", Level::Intermediate),
    ]
}

//
// ─── LESSONS ───────────────────────────────────────────────────────────────────
//

fn lesson(title: &str, content: &str, page: &str, keywords: &[&str]) -> LessonEntry {
    LessonEntry::new(title, content, page).with_keywords(keywords.iter().copied())
}

fn builtin_lessons() -> Vec<LessonEntry> {
    vec![
        lesson(
            "Stock Definition",
            "A stock represents partial ownership in a company. Each share is a small slice \
             of the business, and shareholders take part in its profits and its risks.",
            "What is a Stock",
            &["share", "equity", "ownership", "shareholder"],
        ),
        lesson(
            "Handbag Analogy",
            "Buying stocks is like joining friends to buy a designer handbag together: the \
             more you chip in, the bigger your share of ownership.",
            "What is a Stock",
            &["analogy", "ownership", "share"],
        ),
        lesson(
            "Going Public",
            "When a private company sells shares to the public for the first time through an \
             Initial Public Offering (IPO).",
            "Why Companies Go Public",
            &["IPO", "initial public offering", "listing"],
        ),
        lesson(
            "Pizza Shop Analogy",
            "How Sarah's pizza shop went public to fund expansion: outside investors bought \
             slices of the business so it could open new branches.",
            "Why Companies Go Public",
            &["analogy", "expansion", "capital", "IPO"],
        ),
        lesson(
            "Primary Market",
            "Where companies sell shares for the first time through IPOs. Your money goes to \
             the company itself.",
            "Where to Buy Stocks",
            &["IPO", "new issue", "primary"],
        ),
        lesson(
            "Secondary Market",
            "Where investors trade existing shares among themselves. When you buy on an \
             exchange, the seller is another investor, not the company.",
            "Where to Buy Stocks",
            &["trading", "resale", "secondary"],
        ),
        lesson(
            "House Buying Analogy",
            "Primary market = new construction, Secondary market = existing homes.",
            "Where to Buy Stocks",
            &["analogy", "primary", "secondary"],
        ),
        lesson(
            "Mall Analogy",
            "Stock exchanges work like shopping malls with shops (companies) and shoppers \
             (investors), while mall management keeps trading fair and keeps the records.",
            "Stock Exchanges",
            &["analogy", "exchange", "NYSE", "NASDAQ", "BSE", "NSE"],
        ),
        lesson(
            "Trading Process",
            "How stock trades are executed on exchanges: orders go through a broker, are \
             matched electronically, and settle into your account.",
            "Stock Exchanges",
            &["broker", "order", "settlement", "exchange"],
        ),
        lesson(
            "Company Performance Factors",
            "How company results affect stock prices: earnings beats, product launches and \
             management changes shift what buyers are willing to pay.",
            "Stock Pricing",
            &["earnings", "supply demand", "price"],
        ),
        lesson(
            "Stock Volatility",
            "Understanding why stock prices swing up and down as news, sentiment and the \
             economy push buyers and sellers around.",
            "Stock Pricing",
            &["volatility", "risk", "sentiment"],
        ),
        lesson(
            "Stock Pricing - Key Takeaways",
            "How supply, demand, and various factors determine stock prices.",
            "Stock Pricing",
            &["supply demand", "price discovery"],
        ),
        lesson(
            "Coffee vs Matcha Analogy",
            "Blue-chip stocks (coffee) vs growth stocks (matcha): one is the dependable daily \
             staple, the other the fast-rising trend.",
            "Market Analogies",
            &["coffee matcha", "blue-chip", "growth stock", "analogy"],
        ),
        lesson(
            "Beauty Basket Analogy",
            "How market indices work like tracking a basket of beauty products: follow the \
             basket's total price to see how the whole category is doing.",
            "Market Analogies",
            &["beauty basket", "index", "analogy"],
        ),
        lesson(
            "Seesaw Index Weighting",
            "Why larger companies have more impact on market indices: heavier companies \
             move the seesaw further.",
            "Market Analogies",
            &["weighting", "market cap", "index", "analogy"],
        ),
        lesson(
            "Classroom Analogy",
            "Market indices work like class averages tracking student performance.",
            "Market Indices",
            &["market index", "S&P 500", "Nifty 50", "Sensex", "analogy"],
        ),
        lesson(
            "Index ETFs",
            "How to invest in market indices through Exchange-Traded Funds, buying the whole \
             basket in a single trade.",
            "Market Indices",
            &["ETF", "exchange-traded fund", "passive investing"],
        ),
    ]
}

//
// ─── QUIZZES ───────────────────────────────────────────────────────────────────
//

fn quiz(
    module: &'static str,
    title: &str,
    questions: Vec<Question>,
    pass_mark: u32,
    encourage_mark: Option<u32>,
) -> Quiz {
    Quiz {
        module: ModuleId::from_static(module),
        title: title.to_string(),
        questions,
        pass_mark,
        encourage_mark,
    }
}

fn builtin_quizzes() -> Vec<Quiz> {
    vec![
        quiz(
            WHAT_IS_A_STOCK,
            "Quick Knowledge Check",
            vec![
                Question::single(
                    "When you buy a stock, you become:",
                    &[
                        "A lender to the company",
                        "A partial owner of the company",
                        "An employee of the company",
                        "A customer of the company",
                    ],
                    1,
                ),
                Question::single(
                    "In the handbag analogy, what does your investment amount represent?",
                    &[
                        "The price of the handbag",
                        "Your share of ownership",
                        "The store where you buy",
                        "The friends you're with",
                    ],
                    1,
                ),
            ],
            2,
            None,
        ),
        quiz(
            WHY_GO_PUBLIC,
            "Test Your Understanding",
            vec![Question::each_correct(
                "Why might a company choose to go public? Select all correct reasons:",
                &[
                    "To raise money for expansion",
                    "To pay off existing debt",
                    "To acquire other businesses",
                    "To avoid paying taxes",
                    "To provide exit opportunities for early investors",
                    "To increase company visibility",
                ],
                &[0, 1, 2, 4, 5],
                &[3],
            )],
            4,
            Some(2),
        ),
        quiz(
            WHERE_TO_BUY,
            "Test Your Market Knowledge",
            vec![
                Question::single(
                    "When you buy Apple stock today on the stock exchange, who receives your money?",
                    &[
                        "Apple Inc. (the company)",
                        "Another investor selling their Apple shares",
                        "The stock exchange",
                        "The government",
                    ],
                    1,
                ),
                Question::single(
                    "What is an IPO?",
                    &[
                        "A way to buy stocks cheaply",
                        "When a company sells shares to the public for the first time",
                        "A type of stock exchange",
                        "When stock prices go up",
                    ],
                    1,
                ),
                Question::single(
                    "Which market provides more buying opportunities for regular investors?",
                    &["Primary Market", "Secondary Market", "Both are equal", "Neither"],
                    1,
                ),
            ],
            3,
            Some(2),
        ),
        quiz(
            STOCK_EXCHANGES,
            "Exchange Knowledge Check",
            vec![
                Question::single(
                    "In the mall analogy, what do the individual shops represent?",
                    &[
                        "Stock exchanges",
                        "Companies listed on the exchange",
                        "Investors",
                        "Brokers",
                    ],
                    1,
                ),
                Question::single(
                    "What is the primary role of stock exchange management?",
                    &[
                        "To set stock prices",
                        "To ensure fair trading and maintain records",
                        "To give investment advice",
                        "To guarantee profits",
                    ],
                    1,
                ),
                Question::exact_set(
                    "Which of these are major stock exchanges?",
                    &["NYSE", "NASDAQ", "BSE", "NSE", "McDonald's", "Apple Store"],
                    &[0, 1, 2, 3],
                ),
            ],
            3,
            None,
        ),
        quiz(
            STOCK_PRICING,
            "Price Discovery Quiz",
            vec![
                Question::single(
                    "What is the primary factor that determines stock prices?",
                    &[
                        "The company CEO",
                        "Government regulations",
                        "Supply and demand",
                        "The stock exchange",
                    ],
                    2,
                ),
                Question::single(
                    "If more people want to buy a stock than sell it, what happens to the price?",
                    &["It goes down", "It goes up", "It stays the same", "It becomes volatile"],
                    1,
                ),
                Question::exact_set(
                    "Which factors can influence stock prices? (Select all that apply)",
                    &[
                        "Company earnings",
                        "Economic conditions",
                        "Market sentiment",
                        "News events",
                        "The weather",
                        "Industry trends",
                    ],
                    &[0, 1, 2, 3, 5],
                ),
            ],
            3,
            None,
        ),
        quiz(
            MARKET_ANALOGIES,
            "Analogy Check",
            vec![
                Question::single(
                    "In the coffee vs matcha analogy, what type of stock does coffee represent?",
                    &["Growth stock", "Blue-chip stock", "Penny stock", "International stock"],
                    1,
                ),
                Question::single(
                    "What does the 'Beauty Basket' analogy help explain?",
                    &[
                        "How to buy beauty products",
                        "How market indices work",
                        "How to start a beauty business",
                        "How to invest in beauty companies",
                    ],
                    1,
                ),
                Question::single(
                    "In the seesaw analogy, why don't all companies have equal impact on an index?",
                    &[
                        "Some companies are older",
                        "Larger companies have more weight/influence",
                        "Some companies are more popular",
                        "It's random",
                    ],
                    1,
                ),
            ],
            3,
            None,
        ),
        quiz(
            MARKET_INDICES,
            "Index Knowledge Challenge",
            vec![
                Question::single(
                    "What does a stock market index represent?",
                    &[
                        "A single company's performance",
                        "A group of selected stocks representing market segments",
                        "Government economic policy",
                        "Currency exchange rates",
                    ],
                    1,
                ),
                Question::single(
                    "In the classroom analogy, what does the class average represent?",
                    &[
                        "Individual student performance",
                        "The market index",
                        "The teacher's evaluation",
                        "School administration",
                    ],
                    1,
                ),
                Question::exact_set(
                    "Which of these are actual market indices?",
                    &["S&P 500", "Nifty 50", "NASDAQ", "Sensex", "Apple Index", "Facebook 100"],
                    &[0, 1, 2, 3],
                ),
                Question::single(
                    "How can regular investors buy an entire index?",
                    &[
                        "Buy each stock individually",
                        "Through ETFs (Exchange-Traded Funds)",
                        "Contact the stock exchange directly",
                        "It's not possible",
                    ],
                    1,
                ),
            ],
            4,
            Some(3),
        ),
    ]
}

//
// ─── PRICE SIMULATOR ───────────────────────────────────────────────────────────
//

/// Events offered by the stock-pricing lesson's what-if simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PriceScenario {
    RecordProfits,
    MissedEarnings,
    PositiveRegulation,
    MarketCrash,
    CelebrityEndorsement,
    ProductRecall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Positive,
    Negative,
    Caution,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceImpact {
    pub percent: i8,
    pub tone: Tone,
    pub headline: &'static str,
}

impl PriceScenario {
    pub const ALL: [PriceScenario; 6] = [
        PriceScenario::RecordProfits,
        PriceScenario::MissedEarnings,
        PriceScenario::PositiveRegulation,
        PriceScenario::MarketCrash,
        PriceScenario::CelebrityEndorsement,
        PriceScenario::ProductRecall,
    ];

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            PriceScenario::RecordProfits => "Company reports record profits",
            PriceScenario::MissedEarnings => "Company misses earnings badly",
            PriceScenario::PositiveRegulation => "Industry gets positive regulation",
            PriceScenario::MarketCrash => "Market crash due to economic fears",
            PriceScenario::CelebrityEndorsement => "Celebrity endorses the company",
            PriceScenario::ProductRecall => "Product recall announced",
        }
    }

    #[must_use]
    pub fn impact(self) -> PriceImpact {
        let (percent, tone, headline) = match self {
            PriceScenario::RecordProfits => (15, Tone::Positive, "Stock price jumps"),
            PriceScenario::MissedEarnings => (-20, Tone::Negative, "Stock price drops"),
            PriceScenario::PositiveRegulation => (8, Tone::Positive, "Sector-wide rally"),
            PriceScenario::MarketCrash => (-25, Tone::Negative, "Everything falls"),
            PriceScenario::CelebrityEndorsement => (5, Tone::Neutral, "Social media buzz"),
            PriceScenario::ProductRecall => (-12, Tone::Caution, "Safety concerns"),
        };
        PriceImpact {
            percent,
            tone,
            headline,
        }
    }

    /// Applies this scenario's move to `price`.
    #[must_use]
    pub fn apply(self, price: f64) -> f64 {
        price * (1.0 + f64::from(self.impact().percent) / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::quiz::{Answer, QuestionKind, grade};
    use crate::settings::DEFAULT_TOTAL_MODULES;

    #[test]
    fn builtin_has_seven_modules_in_path_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.modules().len(), DEFAULT_TOTAL_MODULES as usize);
        assert_eq!(catalog.modules()[0].title, "What is a Stock");
        assert_eq!(catalog.modules()[6].title, "Market Indices");
    }

    #[test]
    fn lesson_titles_are_unique() {
        let catalog = Catalog::builtin();
        let titles: HashSet<_> = catalog.lessons().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles.len(), catalog.lessons().len());
    }

    #[test]
    fn every_lesson_page_maps_to_a_module() {
        let catalog = Catalog::builtin();
        for lesson in catalog.lessons() {
            assert!(
                catalog.module_for_page(&lesson.page).is_some(),
                "no module for page {}",
                lesson.page
            );
        }
        assert!(catalog.module_for_page(SEARCH_RESULTS_PAGE).is_none());
    }

    #[test]
    fn every_module_has_a_quiz_with_options_in_range() {
        let catalog = Catalog::builtin();
        for module in catalog.modules() {
            let quiz = catalog.quiz_for(&module.id).expect("quiz for every module");
            assert!(quiz.pass_mark <= quiz.max_score());
            for q in &quiz.questions {
                let n = q.options.len();
                match &q.kind {
                    QuestionKind::SingleChoice { correct } => assert!(*correct < n),
                    QuestionKind::ExactSet { correct } => assert!(correct.iter().all(|&c| c < n)),
                    QuestionKind::EachCorrect { correct, traps } => {
                        assert!(correct.iter().chain(traps).all(|&c| c < n));
                        assert!(correct.is_disjoint(traps));
                    }
                }
            }
        }
    }

    #[test]
    fn perfect_answers_pass_every_builtin_quiz() {
        let catalog = Catalog::builtin();
        for quiz in catalog.quizzes() {
            let answers: Vec<Answer> = quiz
                .questions
                .iter()
                .map(|q| match &q.kind {
                    QuestionKind::SingleChoice { correct } => Answer::Single(*correct),
                    QuestionKind::ExactSet { correct }
                    | QuestionKind::EachCorrect { correct, .. } => Answer::Multi(correct.clone()),
                })
                .collect();
            assert!(grade(quiz, &answers).unwrap().passed(), "{}", quiz.title);
        }
    }

    #[test]
    fn levels_partition_the_path() {
        let catalog = Catalog::builtin();
        let total: usize = [Level::Beginner, Level::Intermediate, Level::Fun]
            .into_iter()
            .map(|l| catalog.modules_at(l).count())
            .sum();
        assert_eq!(total, catalog.modules().len());
    }

    #[test]
    fn price_scenarios_move_the_price() {
        assert!((PriceScenario::RecordProfits.apply(100.0) - 115.0).abs() < 1e-9);
        assert!((PriceScenario::MarketCrash.apply(100.0) - 75.0).abs() < 1e-9);
        assert_eq!(PriceScenario::ProductRecall.impact().tone, Tone::Caution);
        assert_eq!(PriceScenario::ALL.len(), 6);
    }

    #[test]
    fn popular_terms_find_something() {
        let catalog = Catalog::builtin();
        for term in POPULAR_SEARCHES {
            assert!(
                !crate::search::search(term, catalog.lessons()).is_empty(),
                "popular term {term} finds nothing"
            );
        }
    }
}
