//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{header::Header, sidebar::Sidebar, toast_host::ToastHost};
use crate::pages::{
    analysis::AnalysisPage, chunk_analysis::ChunkAnalysisPage, chunks::ChunksPage, fresh_load::FreshLoadPage,
    generate_image::GenerateImagePage, home::HomePage, login::LoginPage, model_test::ModelTestPage,
    regression_load::RegressionLoadPage, signup::SignupPage, task::TaskPage,
};
use crate::state::{auth::AuthState, toast::ToastState};
use crate::util::notify::Notifier;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session, toast, and notifier contexts and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let toasts = RwSignal::new(ToastState::default());

    provide_context(auth);
    provide_context(toasts);
    provide_context(Notifier::new(toasts, auth));

    // Storage is browser-only; read it after hydration so SSR markup matches.
    Effect::new(move || auth.set(AuthState::from_storage()));

    view! {
        <Stylesheet id="leptos" href="/pkg/testbench.css"/>
        <Title text="Testbench"/>

        <Router>
            <div class="app-layout">
                <Sidebar/>
                <div class="app-layout__main">
                    <Header/>
                    <main class="app-layout__content">
                        <Routes fallback=|| "Page not found.".into_view()>
                            <Route path=StaticSegment("") view=HomePage/>
                            <Route path=StaticSegment("login") view=LoginPage/>
                            <Route path=StaticSegment("signup") view=SignupPage/>
                            <Route path=StaticSegment("fresh-load") view=FreshLoadPage/>
                            <Route path=StaticSegment("regression-load") view=RegressionLoadPage/>
                            <Route path=StaticSegment("analysis") view=AnalysisPage/>
                            <Route path=StaticSegment("analysis-verification") view=ChunksPage/>
                            <Route path=(StaticSegment("analysis"), ParamSegment("chunk")) view=ChunkAnalysisPage/>
                            <Route path=StaticSegment("urlmodel-test") view=ModelTestPage/>
                            <Route path=StaticSegment("file-upload") view=ModelTestPage/>
                            <Route path=StaticSegment("generate-image") view=GenerateImagePage/>
                            <Route path=StaticSegment("task") view=TaskPage/>
                        </Routes>
                    </main>
                </div>
            </div>
            <ToastHost/>
        </Router>
    }
}
