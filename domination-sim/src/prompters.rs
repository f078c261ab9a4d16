use std::fmt::{Debug, Display};

use debug_ignore::DebugIgnore;
use dialoguer::{MultiSelect, Select};
use iter_tools::Itertools;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::cards::{CardInfo, CardKind, CardView};
use crate::events::*;

/// Answers decision requests on behalf of an actor.
pub trait Policy: Debug + Send {
    fn answer(&mut self, request: &DecisionRequest) -> Reply;
}

/// A choice shown to a prompter, with the value it stands for.
pub struct Labeled<T> {
    pub label: String,
    pub value: T,
}
impl<T> Labeled<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Labeled {
            label: label.into(),
            value,
        }
    }
}
impl<T> Display for Labeled<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[derive(Debug, Default)]
pub struct DefaultPrompter {}
impl DefaultPrompter {
    pub fn new() -> Self {
        DefaultPrompter {}
    }
}

impl Prompter for DefaultPrompter {
    fn prompt_choice<T: ToString>(&mut self, text: &str, choices: Vec<T>) -> T {
        info!("choosing first choice for: {text}");
        self.print_choices(&choices);

        let c = choices
            .into_iter()
            .next()
            .expect("always at least one choice");
        info!("{}", c.to_string());
        c
    }

    fn prompt_multi_choices<T: ToString>(
        &mut self,
        text: &str,
        choices: Vec<T>,
        min: usize,
        _max: usize,
    ) -> Vec<T> {
        info!("choosing first choices for: {text}");
        self.print_choices(&choices);

        let c: Vec<_> = choices.into_iter().take(min).collect();
        info!("{}", c.iter().map(T::to_string).collect_vec().join(", "));
        c
    }
}

#[derive(Debug)]
pub struct RandomPrompter {
    rng: DebugIgnore<StdRng>,
}
impl RandomPrompter {
    pub fn new() -> Self {
        RandomPrompter {
            rng: DebugIgnore(StdRng::from_entropy()),
        }
    }
    pub fn with_seed(seed: u64) -> Self {
        RandomPrompter {
            rng: DebugIgnore(StdRng::seed_from_u64(seed)),
        }
    }
}
impl Default for RandomPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for RandomPrompter {
    fn prompt_choice<T: ToString>(&mut self, text: &str, choices: Vec<T>) -> T {
        info!("choosing random choice for: {text}");
        self.print_choices(&choices);

        let c = choices
            .into_iter()
            .choose(&mut *self.rng)
            .expect("always at least one choice");
        info!("{}", c.to_string());
        c
    }

    fn prompt_multi_choices<T: ToString>(
        &mut self,
        text: &str,
        choices: Vec<T>,
        min: usize,
        max: usize,
    ) -> Vec<T> {
        info!("choosing random choices for: {text}");
        self.print_choices(&choices);

        let max = max.min(choices.len());
        let amount = self.rng.gen_range(min.min(max)..=max);

        let c = choices.into_iter().choose_multiple(&mut *self.rng, amount);
        info!("{}", c.iter().map(T::to_string).collect_vec().join(", "));
        c
    }
}

#[derive(Debug, Default)]
pub struct BufferedPrompter {
    buffer: Vec<Vec<usize>>,
}
impl BufferedPrompter {
    pub fn new(buffer: &[&[usize]]) -> Self {
        BufferedPrompter {
            buffer: buffer
                .iter()
                .map(|b| b.iter().copied().collect_vec())
                .collect_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Prompter for BufferedPrompter {
    fn prompt_choice<T: ToString>(&mut self, text: &str, mut choices: Vec<T>) -> T {
        info!("choosing buffered choice for: {text}");
        self.print_choices(&choices);

        let mut buf = self.buffer.remove(0);
        assert!(buf.len() == 1);
        let c = choices.remove(buf.remove(0));
        info!("{}", c.to_string());
        c
    }

    fn prompt_multi_choices<T: ToString>(
        &mut self,
        text: &str,
        choices: Vec<T>,
        _min: usize,
        _max: usize,
    ) -> Vec<T> {
        info!("choosing buffered choices for: {text}");
        self.print_choices(&choices);

        // bounds are left to the game, so tests can send bad replies
        let buf = self.buffer.remove(0);
        let c = choices
            .into_iter()
            .enumerate()
            .filter(|(i, _)| buf.contains(i))
            .map(|(_, c)| c)
            .collect_vec();
        info!("{}", c.iter().map(T::to_string).collect_vec().join(", "));
        c
    }
}

/// Asks a human on the terminal.
#[derive(Debug, Default)]
pub struct CliPrompter {}
impl CliPrompter {
    pub fn new() -> Self {
        CliPrompter {}
    }
}

impl Prompter for CliPrompter {
    fn prompt_choice<T: ToString>(&mut self, text: &str, mut choices: Vec<T>) -> T {
        let items = choices.iter().map(T::to_string).collect_vec();
        let selected = Select::new()
            .with_prompt(text)
            .items(&items)
            .default(0)
            .interact()
            .unwrap_or_else(|e| {
                warn!("could not read the choice: {e}");
                0
            });
        choices.remove(selected)
    }

    fn prompt_multi_choices<T: ToString>(
        &mut self,
        text: &str,
        choices: Vec<T>,
        min: usize,
        max: usize,
    ) -> Vec<T> {
        let items = choices.iter().map(T::to_string).collect_vec();
        let prompt = if min == max {
            format!("{text} (select {min})")
        } else {
            format!("{text} (select {min} to {max})")
        };
        let selected = MultiSelect::new()
            .with_prompt(prompt)
            .items(&items)
            .interact()
            .unwrap_or_else(|e| {
                warn!("could not read the choices: {e}");
                (0..min).collect()
            });
        choices
            .into_iter()
            .enumerate()
            .filter(|(i, _)| selected.contains(i))
            .map(|(_, c)| c)
            .collect()
    }
}

pub trait Prompter: Debug {
    fn prompt_choice<T: ToString>(&mut self, text: &str, choices: Vec<T>) -> T;
    fn prompt_multi_choices<T: ToString>(
        &mut self,
        text: &str,
        choices: Vec<T>,
        min: usize,
        max: usize,
    ) -> Vec<T>;

    fn print_choices<T: ToString>(&mut self, choices: &[T]) {
        info!(
            "options:\n{}",
            choices
                .iter()
                .map(|c| format!("  - {}", c.to_string()))
                .collect_vec()
                .join("\n")
        );
    }
}

impl<P: Prompter + Send> Policy for P {
    fn answer(&mut self, request: &DecisionRequest) -> Reply {
        match request {
            DecisionRequest::YesNo(req) => {
                let yes = self
                    .prompt_choice(
                        &req.message,
                        vec![Labeled::new("No", false), Labeled::new("Yes", true)],
                    )
                    .value;
                Reply::YesNo(yes)
            }
            DecisionRequest::ChooseOption(req) => {
                let options = req
                    .options
                    .iter()
                    .map(|o| Labeled::new(o.label.clone(), o.key.clone()))
                    .collect_vec();
                Reply::Option(self.prompt_choice(&req.message, options).value)
            }
            DecisionRequest::SelectHandCards(req) => {
                let cards = req
                    .selectable
                    .iter()
                    .map(|c| Labeled::new(c.to_string(), c.id))
                    .collect_vec();
                let selected = self
                    .prompt_multi_choices(&req.message, cards, req.min_count(), req.max_count())
                    .into_iter()
                    .map(|c| c.value)
                    .collect();
                Reply::Cards(selected)
            }
            DecisionRequest::SelectCardType(req) => {
                let mut choices = vec![];
                if req.optional {
                    choices.push(Labeled::new("(none)", None));
                }
                choices.extend(
                    req.choices
                        .iter()
                        .map(|c| Labeled::new(c.to_string(), Some(c.key.clone()))),
                );
                Reply::CardType(self.prompt_choice(&req.message, choices).value)
            }
            DecisionRequest::SelectDeal(req) => {
                let mut choices = vec![Labeled::new("(end buy phase)", None)];
                choices.extend(
                    req.buyable
                        .iter()
                        .map(|c| Labeled::new(c.to_string(), Some(c.key.clone()))),
                );
                let text = format!(
                    "{} [{} coins, {} potions, {} buys]",
                    req.message, req.coins, req.potions, req.remaining_buys
                );
                Reply::Deal(self.prompt_choice(&text, choices).value)
            }
        }
    }
}

/// Deterministic bot: same request, same answer.
#[derive(Debug, Default)]
pub struct WisePrompter {}
impl WisePrompter {
    pub fn new() -> Self {
        WisePrompter {}
    }

    fn worth_buying(card: &CardInfo) -> bool {
        !card.is_junk()
    }

    fn by_cost_desc(cards: &mut [CardView]) {
        cards.sort_by(|a, b| {
            b.info
                .cost
                .cmp(&a.info.cost)
                .then(b.info.potion_cost.cmp(&a.info.potion_cost))
                .then(a.info.key.cmp(&b.info.key))
                .then(a.id.cmp(&b.id))
        });
    }

    fn junk_first(cards: &mut [CardView]) {
        cards.sort_by_key(|c| {
            let rank = if c.info.is(CardKind::Curse) {
                0
            } else if c.info.is(CardKind::Victory) && !c.info.is(CardKind::Action) {
                1
            } else if c.info.is_junk() {
                2
            } else {
                3
            };
            (rank, c.info.cost, c.info.key.clone(), c.id)
        });
    }

    fn select_hand_cards(req: &SelectHandCards) -> Vec<crate::zones::CardId> {
        let mut cards = req.selectable.clone();
        let (min, max) = (req.min_count(), req.max_count());
        let amount = match req.purpose {
            SelectPurpose::Play => {
                Self::by_cost_desc(&mut cards);
                max.min(1).max(min)
            }
            SelectPurpose::Treasures | SelectPurpose::React => max,
            SelectPurpose::Trash => {
                Self::junk_first(&mut cards);
                let junk = cards
                    .iter()
                    .filter(|c| c.info.is(CardKind::Curse) || c.info.is_junk())
                    .count();
                junk.clamp(min, max)
            }
            SelectPurpose::Discard => {
                Self::junk_first(&mut cards);
                let useless = cards
                    .iter()
                    .filter(|c| {
                        c.info.is(CardKind::Curse)
                            || (c.info.is(CardKind::Victory) && !c.info.is(CardKind::Action))
                    })
                    .count();
                useless.clamp(min, max)
            }
            SelectPurpose::Reveal | SelectPurpose::Other => {
                Self::junk_first(&mut cards);
                min
            }
        };
        cards.into_iter().take(amount).map(|c| c.id).collect()
    }
}

impl Policy for WisePrompter {
    fn answer(&mut self, request: &DecisionRequest) -> Reply {
        let reply = match request {
            DecisionRequest::YesNo(_) => Reply::YesNo(true),
            DecisionRequest::ChooseOption(req) => Reply::Option(
                req.options
                    .first()
                    .map(|o| o.key.clone())
                    .unwrap_or_default(),
            ),
            DecisionRequest::SelectHandCards(req) => Reply::Cards(Self::select_hand_cards(req)),
            DecisionRequest::SelectCardType(req) => {
                let best = req
                    .choices
                    .iter()
                    .filter(|c| !c.is(CardKind::Curse) || !req.optional)
                    .sorted_by(|a, b| {
                        b.cost
                            .cmp(&a.cost)
                            .then(b.potion_cost.cmp(&a.potion_cost))
                            .then(a.key.cmp(&b.key))
                    })
                    .next()
                    .map(|c| c.key.clone());
                Reply::CardType(best)
            }
            DecisionRequest::SelectDeal(req) => {
                let best = req
                    .buyable
                    .iter()
                    .filter(|c| Self::worth_buying(c))
                    .sorted_by(|a, b| {
                        b.cost
                            .cmp(&a.cost)
                            .then(b.potion_cost.cmp(&a.potion_cost))
                            .then(a.key.cmp(&b.key))
                    })
                    .next()
                    .map(|c| c.key.clone());
                Reply::Deal(best)
            }
        };
        info!("{}: {reply:?}", request.message());
        reply
    }
}
