mod backdrop;
mod carousel;
mod contact;
mod dom;
mod icons;
mod particles;
mod scroll;

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

use crate::config::{ClientLogLevel, SiteConfig};
use crate::content::{
    Section, ABOUT, CERTIFICATES, CLUBS, CONTACT_DETAILS, EDUCATION, EXPERIENCE, FOOTER_NOTICE,
    HERO_GREETING, HERO_TAGLINE, LOGO_ASSET, OWNER_NAME, PROJECTS, SKILLS, SOCIAL_LINKS,
    SocialIcon,
};
use crate::visuals::{BlurTarget, Edge};
use backdrop::{EdgeBlur, VeilBackground};
use carousel::ProjectCarousel;
use contact::ContactPanel;
use icons::Icon;
use particles::use_particle_bursts;
use scroll::{scroll_to_section, use_scroll_state};
use std::rc::Rc;
use web_sys::window;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct NavLinkProps {
    section: Section,
    active: bool,
}

#[function_component(NavLink)]
fn nav_link(props: &NavLinkProps) -> Html {
    let section = props.section;
    let onclick = Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        scroll_to_section(section.id());
    });

    html! {
        <a
            href={section.href()}
            class={classes!("nav-link", props.active.then_some("active"))}
            aria-current={props.active.then_some("location")}
            onclick={onclick}
        >
            {section.nav_label()}
        </a>
    }
}

#[derive(Properties, PartialEq)]
struct CardSectionProps {
    section: Section,
    children: Html,
}

#[function_component(CardSection)]
fn card_section(props: &CardSectionProps) -> Html {
    html! {
        <section id={props.section.id()} class="card fade-in">
            <h2>{props.section.heading()}</h2>
            {props.children.clone()}
        </section>
    }
}

fn social_icon(icon: SocialIcon) -> Icon {
    match icon {
        SocialIcon::LinkedIn => Icon::LinkedIn,
        SocialIcon::GitHub => Icon::GitHub,
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: Rc<SiteConfig>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let scroll = use_scroll_state();
    use_particle_bursts();

    let config = &props.config;
    let asset_base = AttrValue::from(config.asset_base.clone());

    html! {
        <>
            <VeilBackground hue_shift={23.0} warp_amount={5.0} speed={1.7} />
            <EdgeBlur target={BlurTarget::Page} edge={Edge::Bottom} height="6rem" />
            <a class="skip-link" href="#content">{"Skip to main content"}</a>
            <div class="page-shell">
                <header class={classes!(scroll.scrolled.then_some("scrolled"))}>
                    <nav aria-label="Sections">
                        <div class="logo">
                            <img src={config.asset(LOGO_ASSET)} alt="" aria-hidden="true" />
                            <span>{OWNER_NAME}</span>
                        </div>
                        <ul>
                            { for Section::NAV.into_iter().map(|section| html! {
                                <li>
                                    <NavLink section={section} active={scroll.active == Some(section)} />
                                </li>
                            }) }
                        </ul>
                    </nav>
                </header>

                <main id="content">
                    <section id="hero">
                        <div class="hero-text">
                            <h1>{HERO_GREETING}</h1>
                            <p>{HERO_TAGLINE}</p>
                            <div class="social-links">
                                { for SOCIAL_LINKS.iter().map(|link| html! {
                                    <a
                                        href={link.href}
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        aria-label={link.label}
                                    >
                                        { icons::svg(social_icon(link.icon)) }
                                    </a>
                                }) }
                            </div>
                        </div>
                    </section>

                    <CardSection section={Section::About}>
                        <p>{ABOUT}</p>
                    </CardSection>

                    <CardSection section={Section::Experience}>
                        { for EXPERIENCE.iter().map(|entry| html! {
                            <div class="item">
                                <h3>{format!("{} - {}", entry.role, entry.organisation)}</h3>
                                <p class="date">{entry.period}</p>
                                <p>{entry.summary}</p>
                            </div>
                        }) }
                    </CardSection>

                    <section id={Section::Projects.id()} class="projects-section">
                        <h2 class="projects-heading">{Section::Projects.heading()}</h2>
                        <ProjectCarousel projects={PROJECTS} asset_base={asset_base} />
                    </section>

                    <CardSection section={Section::Skills}>
                        <div class="skills-container">
                            { for SKILLS.iter().map(|skill| html! { <span>{*skill}</span> }) }
                        </div>
                    </CardSection>

                    <CardSection section={Section::Certificates}>
                        { for CERTIFICATES.iter().map(|entry| html! {
                            <div class="item">
                                <h3>{entry.title}</h3>
                                if let Some(issuer) = entry.issuer {
                                    <p class="date">{issuer}</p>
                                }
                            </div>
                        }) }
                    </CardSection>

                    <CardSection section={Section::Education}>
                        { for EDUCATION.iter().map(|entry| html! {
                            <div class="item">
                                <h3>{entry.institution}</h3>
                                <p>{entry.programme}</p>
                                <p>{entry.score}</p>
                            </div>
                        }) }
                    </CardSection>

                    <CardSection section={Section::Clubs}>
                        { for CLUBS.iter().map(|entry| html! {
                            <div class="item">
                                <h3>{entry.role}</h3>
                                <p>{entry.details}</p>
                            </div>
                        }) }
                    </CardSection>

                    <CardSection section={Section::Contact}>
                        <ContactPanel
                            details={CONTACT_DETAILS}
                            relay_url={config.contact_relay_url.clone()}
                        />
                    </CardSection>
                </main>

                <footer>
                    <p>{FOOTER_NOTICE}</p>
                </footer>
            </div>
        </>
    }
}

fn log_level(level: ClientLogLevel) -> log::Level {
    match level {
        ClientLogLevel::Debug => log::Level::Debug,
        ClientLogLevel::Info => log::Level::Info,
        ClientLogLevel::Warn => log::Level::Warn,
    }
}

pub fn run() {
    let config = SiteConfig::from_build_env();
    let _ = console_log::init_with_level(log_level(config.log_level));
    if config.relay_configured() {
        log::debug!("contact relay: {}", config.contact_relay_url);
    } else {
        log::warn!("CONTACT_RELAY_URL was not set at build time; the contact form has no relay");
    }

    yew::Renderer::<App>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        AppProps {
            config: Rc::new(config),
        },
    )
    .render();
}
