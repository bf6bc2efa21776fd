use super::Blueprint;

impl Blueprint {
    /// Layout of the multi-framework Student Event Page project.
    ///
    /// The framework folders (`react-app`, `angular-app`, `vue-app`) stay
    /// empty so the framework generators can populate them later.
    pub fn student_event_page() -> Self {
        let frontend = Blueprint::new()
            .with_empty_directory("react-app")
            .with_empty_directory("angular-app")
            .with_empty_directory("vue-app")
            .with_files("styles", ["main.css"]);

        let backend = Blueprint::new()
            .with_files("node-express-api", ["server.js", "package.json"])
            .with_files("flask-api", ["app.py", "requirements.txt"])
            .with_files("django-api", ["manage.py"]);

        let database = Blueprint::new()
            .with_files("mysql", ["schema.sql"])
            .with_files("mongodb", ["models.js"]);

        let project = Blueprint::new()
            .with_directory("frontend", frontend)
            .with_directory("backend", backend)
            .with_directory("database", database)
            .with_files("auth", ["auth.js"])
            .with_files("deployment", ["Dockerfile", "docker-compose.yml"])
            .with_files("git", [".gitignore"]);

        Blueprint::new().with_directory("StudentEventPage", project)
    }
}
