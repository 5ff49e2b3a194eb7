use std::collections::BTreeMap;

use anyhow::Result;
use derive_more::Display;
use healthguard::auth::{AuthStore, NewCommunityUser, SignupProfile};
use healthguard::guard::{self, Decision, View};
use healthguard::health_data::HealthDataStore;
use healthguard::models::{Disease, NewCase, NewSubscription, RiskLevel, Role, Severity};
use healthguard::report::{self, CheckupReport};
use healthguard::utils::input_validation::{email_input, phone_input};
use inquire::{Password, Select, Text};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

const LOG_FILE: &str = "./healthguard.log";

type MenuExit = Option<()>;
const MENU_EXIT: MenuExit = None;
const MENU_LOOP: MenuExit = Some(());

/// A text menu. `enter` returns None to leave the menu, Some(()) to show
/// it again; `enter_loop` keeps it running and reports errors in between.
trait Menu {
    fn enter(&mut self) -> Result<MenuExit>;

    fn enter_loop(&mut self) {
        while let Some(result) = self.enter().transpose() {
            if let Err(error) = result {
                eprintln!("Error: {error}");
            }
        }
    }
}

pub struct App {
    auth: AuthStore,
    data: HealthDataStore,
}

impl App {
    pub fn new(auth: AuthStore, data: HealthDataStore) -> Self {
        App { auth, data }
    }

    pub fn start(&mut self) -> Result<()> {
        println!("Welcome to HealthGuard, the community health monitoring dashboard.");
        self.enter_loop();
        Ok(())
    }
}

impl Menu for App {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Log in")]
            Login,
            #[display("Sign up as a villager")]
            Signup,
            #[display("Quit")]
            Exit,
        }

        let choice = Select::new("What would you like to do?", Choice::iter().collect()).prompt()?;

        match choice {
            Choice::Login => {
                let role = Select::new("Log in as:", Role::iter().collect()).prompt()?;
                let email = email_input("Email:");
                let password = Password::new("Password:")
                    .without_confirmation()
                    .with_display_mode(inquire::PasswordDisplayMode::Masked)
                    .prompt()?;

                if self.auth.login(email.as_ref(), &password, role, None) {
                    self.open_session();
                } else {
                    println!("[!] Wrong email or password for that role.");
                }
                Ok(MENU_LOOP)
            }
            Choice::Signup => {
                let name = Text::new("Full name:").prompt()?;
                let email = email_input("Email:");
                let phone = phone_input("Mobile number:");
                let village = Text::new("Village:").prompt()?;
                let password = Password::new("Choose a password:")
                    .with_display_mode(inquire::PasswordDisplayMode::Masked)
                    .prompt()?;

                let profile = SignupProfile {
                    name,
                    phone: Some(phone.as_ref().to_string()),
                    village: Some(village).filter(|v| !v.trim().is_empty()),
                };
                // The signup path always registers and opens a session.
                self.auth
                    .login(email.as_ref(), &password, Role::People, Some(profile));
                self.open_session();
                Ok(MENU_LOOP)
            }
            Choice::Exit => Ok(MENU_EXIT),
        }
    }
}

impl App {
    fn open_session(&mut self) {
        if let Some(user) = self.auth.user() {
            eprintln!("[*] Welcome, {}.", user.name);
        }
        SessionMenu {
            auth: &mut self.auth,
            data: &mut self.data,
        }
        .enter_loop();
    }
}

struct SessionMenu<'srv> {
    auth: &'srv mut AuthStore,
    data: &'srv mut HealthDataStore,
}

impl Menu for SessionMenu<'_> {
    fn enter(&mut self) -> Result<MenuExit> {
        let Some(role) = self.auth.user().map(|u| u.role) else {
            return Ok(MENU_EXIT);
        };

        #[derive(Display)]
        enum Choice {
            #[display("{_0}")]
            Open(View),
            #[display("Log out")]
            Logout,
        }

        let mut options: Vec<Choice> = View::iter()
            .filter(|view| *view != View::Login)
            .map(Choice::Open)
            .collect();
        options.push(Choice::Logout);

        match Select::new("Where to?", options).prompt()? {
            Choice::Open(view) => {
                // Re-evaluated on every navigation.
                match guard::evaluate(Some(role), view) {
                    Decision::Render => self.render(view)?,
                    Decision::Redirect(View::Login) => {
                        println!("[!] Please log in first.");
                        return Ok(MENU_EXIT);
                    }
                    Decision::Redirect(target) => {
                        println!("[!] {view} is restricted for your role, opening {target}.");
                        self.render(target)?;
                    }
                }
                Ok(MENU_LOOP)
            }
            Choice::Logout => {
                self.auth.logout();
                Ok(MENU_EXIT)
            }
        }
    }
}

impl SessionMenu<'_> {
    fn render(&mut self, view: View) -> Result<()> {
        match view {
            View::Dashboard => self.show_dashboard(),
            View::Analytics => self.show_analytics(),
            View::Alerts => self.show_alerts(),
            View::CaseEntry => CaseEntryMenu {
                data: &mut *self.data,
            }
            .enter_loop(),
            View::AdminDashboard => self.show_admin_dashboard(),
            View::AdminPanel => AdminPanelMenu {
                auth: &mut *self.auth,
            }
            .enter_loop(),
            View::CommunityPortal => {
                let (name, village) = self
                    .auth
                    .user()
                    .map(|u| (u.name.clone(), u.village.clone().unwrap_or_default()))
                    .unwrap_or_default();
                CommunityMenu {
                    data: &mut *self.data,
                    default_name: name,
                    default_village: village,
                }
                .enter_loop()
            }
            View::Checkup => self.run_checkup()?,
            View::Login => println!("[*] You are already logged in."),
        }
        Ok(())
    }

    fn show_dashboard(&self) {
        println!("\n=== Dashboard ===");
        println!(
            "Total cases: {}   Active: {}   Recovered: {}   Contamination index: {}%",
            self.data.total_cases(),
            self.data.active_cases(),
            self.data.recovered(),
            self.data.contamination()
        );
        println!("\n{:<14} {:>6}  {}", "Village", "Cases", "Risk");
        for village in self.data.villages() {
            println!("{:<14} {:>6}  {}", village.name, village.cases, village.risk);
        }
    }

    fn show_analytics(&self) {
        println!("\n=== Analytics ===");
        let mut by_disease: BTreeMap<String, usize> = BTreeMap::new();
        for case in self.data.cases() {
            *by_disease.entry(case.disease.to_string()).or_default() += 1;
        }
        if by_disease.is_empty() {
            println!("No cases recorded yet.");
            return;
        }
        for (disease, count) in by_disease {
            println!("{disease:<14} {count}");
        }
    }

    fn show_alerts(&self) {
        println!("\n=== Alerts ===");
        let mut quiet = true;
        for village in self.data.villages() {
            if village.risk == RiskLevel::High {
                println!(
                    "[CRITICAL] {}: {} cases. Immediate attention required.",
                    village.name, village.cases
                );
                quiet = false;
            }
        }
        if quiet {
            println!("No active alerts.");
        }
    }

    fn show_admin_dashboard(&self) {
        println!("\n=== Admin Dashboard ===");
        println!(
            "Cases: {} total, {} active, {} recovered. Contamination index: {}%.",
            self.data.total_cases(),
            self.data.active_cases(),
            self.data.recovered(),
            self.data.contamination()
        );
        println!(
            "Accounts: {} health workers, {} community users. {} alert subscriptions.",
            self.auth.health_workers().count(),
            self.auth.community_users().count(),
            self.data.subscriptions().len()
        );
    }

    fn run_checkup(&mut self) -> Result<()> {
        let (name, village_default) = self
            .auth
            .user()
            .map(|u| (u.name.clone(), u.village.clone().unwrap_or_default()))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        let symptoms = Text::new("Describe your symptoms:").prompt()?;
        let disease = Select::new("Suspected disease:", known_diseases()).prompt()?;
        let severity = Select::new("How severe does it feel?", Severity::iter().collect()).prompt()?;
        let village = Text::new("Village:")
            .with_initial_value(&village_default)
            .prompt()?;

        self.data.add_case(NewCase {
            name: name.clone(),
            age: 0,
            village: if village.trim().is_empty() {
                "Unknown".to_string()
            } else {
                village.clone()
            },
            disease: disease.clone(),
            severity,
            location: None,
        });

        let date = self.data.cases()[0].date;
        let text = report::checkup_report(&CheckupReport {
            patient: &name,
            village: &village,
            date,
            disease: &disease,
            severity,
            symptoms: &symptoms,
        });
        println!("\n{text}\n");
        Ok(())
    }
}

/// The five tracked disease categories, without the free-text variant.
fn known_diseases() -> Vec<Disease> {
    Disease::iter()
        .filter(|d| !matches!(d, Disease::Other(_)))
        .collect()
}

struct CaseEntryMenu<'srv> {
    data: &'srv mut HealthDataStore,
}

impl Menu for CaseEntryMenu<'_> {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Report a new case")]
            AddCase,
            #[display("Import cases from CSV")]
            ImportCsv,
            #[display("Export case ledger as CSV")]
            ExportCsv,
            #[display("Export case ledger as JSON")]
            ExportJson,
            #[display("Back")]
            Back,
        }

        match Select::new("Case entry:", Choice::iter().collect()).prompt()? {
            Choice::AddCase => {
                let name = Text::new("Patient name:").prompt()?;
                let age: i32 = Text::new("Age:").prompt()?.trim().parse()?;
                let village = Text::new("Village:").prompt()?;
                let disease = Select::new("Disease:", known_diseases()).prompt()?;
                let severity = Select::new("Severity:", Severity::iter().collect()).prompt()?;

                self.data.add_case(NewCase {
                    name,
                    age,
                    village,
                    disease,
                    severity,
                    location: None,
                });
                println!("[*] Case recorded.");
                Ok(MENU_LOOP)
            }
            Choice::ImportCsv => {
                let input = inquire::Editor::new(&format!(
                    "Paste CSV rows ({}):",
                    report::CASE_CSV_HEADER
                ))
                .prompt()?;
                let batch = report::parse_cases(&input)?;
                let ids = self.data.add_cases_from_csv(batch);
                println!("[*] Imported {} cases.", ids.len());
                Ok(MENU_LOOP)
            }
            Choice::ExportCsv => {
                println!("{}", report::cases_csv(self.data.cases()));
                Ok(MENU_LOOP)
            }
            Choice::ExportJson => {
                println!("{}", report::cases_json(self.data.cases())?);
                Ok(MENU_LOOP)
            }
            Choice::Back => Ok(MENU_EXIT),
        }
    }
}

struct AdminPanelMenu<'srv> {
    auth: &'srv mut AuthStore,
}

impl Menu for AdminPanelMenu<'_> {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Add a community user")]
            AddCommunityUser,
            #[display("List community users")]
            ListCommunity,
            #[display("List health workers")]
            ListHealthWorkers,
            #[display("Back")]
            Back,
        }

        match Select::new("Admin panel:", Choice::iter().collect()).prompt()? {
            Choice::AddCommunityUser => {
                let name = Text::new("Name:").prompt()?;
                let email = email_input("Email:");
                let phone = phone_input("Mobile number:");
                let village = Text::new("Village:").prompt()?;
                let password = Password::new("Password (empty for the default):")
                    .without_confirmation()
                    .prompt()?;

                self.auth.add_community_user(NewCommunityUser {
                    name,
                    email: email.as_ref().to_string(),
                    phone: Some(phone.as_ref().to_string()),
                    village: Some(village).filter(|v| !v.trim().is_empty()),
                    password: Some(password).filter(|p| !p.is_empty()),
                });
                println!("[*] Community account created.");
                Ok(MENU_LOOP)
            }
            Choice::ListCommunity => {
                for account in self.auth.community_users() {
                    println!("{account}");
                }
                Ok(MENU_LOOP)
            }
            Choice::ListHealthWorkers => {
                for account in self.auth.health_workers() {
                    println!("{account}");
                }
                Ok(MENU_LOOP)
            }
            Choice::Back => Ok(MENU_EXIT),
        }
    }
}

struct CommunityMenu<'srv> {
    data: &'srv mut HealthDataStore,
    default_name: String,
    default_village: String,
}

impl Menu for CommunityMenu<'_> {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Subscribe to village alerts")]
            Subscribe,
            #[display("List my subscriptions")]
            ListSubscriptions,
            #[display("Village risk overview")]
            Villages,
            #[display("Back")]
            Back,
        }

        match Select::new("Community portal:", Choice::iter().collect()).prompt()? {
            Choice::Subscribe => {
                let name = Text::new("Name:")
                    .with_initial_value(&self.default_name)
                    .prompt()?;
                let phone = phone_input("Mobile number:");
                let village = Text::new("Village:")
                    .with_initial_value(&self.default_village)
                    .prompt()?;

                self.data.add_subscription(NewSubscription {
                    name,
                    phone: phone.as_ref().to_string(),
                    village,
                });
                println!("[*] Subscribed. You will be alerted about this village.");
                Ok(MENU_LOOP)
            }
            Choice::ListSubscriptions => {
                for sub in self.data.subscriptions() {
                    println!("{} (since {})", sub, sub.subscribed_at.date_naive());
                }
                Ok(MENU_LOOP)
            }
            Choice::Villages => {
                for village in self.data.villages() {
                    println!("{village}");
                }
                Ok(MENU_LOOP)
            }
            Choice::Back => Ok(MENU_EXIT),
        }
    }
}

fn main() -> anyhow::Result<()> {
    simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info)?;

    let auth = AuthStore::new();
    let data = HealthDataStore::seeded();
    App::new(auth, data).start()
}
