//! Built-in ACEX project tables
//!
//! Amounts, subtotals and summary percentages are literals; nothing here is
//! computed.

use chrono::NaiveDate;
use gridreport_core::{
    Activity, ActivityKind, CellValue, ColumnSpec, Record, ResourceSheet, Section, SummaryEntry,
};
use gridreport_render::{GanttReport, ResourcesReport};

/// Default Gantt workbook file name
pub const GANTT_FILE: &str = "GANTT_ACEX.xlsx";

/// Default resources workbook file name
pub const RESOURCES_FILE: &str = "RECURSOS_LOGISTICA_ACEX.xlsx";

macro_rules! record {
    ($($value:expr),* $(,)?) => {
        Record::new(vec![$(CellValue::from($value)),*])
    };
}

/// Project start (week 0)
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap_or_default()
}

// id, label, start week, duration, resources, tag
#[rustfmt::skip]
const ACTIVITIES: &[(&str, &str, f64, f64, &str, &str)] = &[
    ("1",   "■ ANÁLISIS Y DISEÑO",                0.0,  3.0, "Analista/Arquitecto",      "fase"),
    ("1.1", "Análisis de requisitos",             0.0,  1.0, "Analista + Cliente",       "tarea"),
    ("1.2", "Diseño de base de datos",            1.0,  1.0, "Arquitecto BD",            "tarea"),
    ("1.3", "Diseño de arquitectura",             2.0,  1.0, "Arquitecto Software",      "tarea"),
    ("H1",  "🏁 HITO 1: Diseño Completado",       3.0,  0.0, "22/09/2024",               "hito"),

    ("2",   "■ DESARROLLO BACKEND",               2.0,  5.0, "Dev. Backend (2)",         "fase"),
    ("2.1", "Configuración inicial",              2.0,  1.0, "Dev. Backend Senior",      "tarea"),
    ("2.2", "Modelos y repositorios",             3.0,  1.0, "Dev. Backend (2)",         "tarea"),
    ("2.3", "Servicios de negocio",               4.0,  2.0, "Dev. Backend (2)",         "tarea"),
    ("2.4", "Controladores API",                  6.0,  1.0, "Dev. Backend Senior",      "tarea"),
    ("2.5", "Testing backend",                    7.0,  1.0, "Dev. Backend + Tester",    "tarea"),
    ("H2",  "🏁 HITO 2: Backend Funcional",       8.0,  0.0, "27/10/2024",               "hito"),

    ("3",   "■ INTEGRACIÓN FIREBASE",             5.0,  3.0, "Dev. Backend + Cloud",     "fase"),
    ("3.1", "Configuración Firebase",             5.0,  1.0, "Dev. Cloud",               "tarea"),
    ("3.2", "Chat en tiempo real",                6.0,  1.0, "Dev. Backend",             "tarea"),
    ("3.3", "Notificaciones push",                7.0,  1.0, "Dev. Backend",             "tarea"),
    ("H3",  "🏁 HITO 3: Firebase Integrado",      8.0,  0.0, "03/11/2024",               "hito"),

    ("4",   "■ DESARROLLO FRONTEND",              4.0,  6.0, "Dev. Frontend (2)",        "fase"),
    ("4.1", "Configuración Flutter",              4.0,  1.0, "Dev. Frontend Senior",     "tarea"),
    ("4.2", "Sistema de diseño",                  5.0,  1.0, "Dev. Frontend + Designer", "tarea"),
    ("4.3", "Gestión de estado",                  6.0,  1.0, "Dev. Frontend (2)",        "tarea"),
    ("4.4", "Pantallas principales",              7.0,  2.0, "Dev. Frontend (2)",        "tarea"),
    ("4.5", "Funcionalidades avanzadas",          9.0,  1.0, "Dev. Frontend (2)",        "tarea"),
    ("4.6", "Testing frontend",                  10.0,  1.0, "Dev. Frontend + Tester",   "tarea"),
    ("H4",  "🏁 HITO 4: App Completa",           11.0,  0.0, "17/11/2024",               "hito"),

    ("5",   "■ DESPLIEGUE E INFRAESTRUCTURA",    11.0,  2.0, "DevOps + Equipo",          "fase"),
    ("5.1", "Configuración servidores",          11.0,  1.0, "DevOps",                   "tarea"),
    ("5.2", "Compilación aplicaciones",          12.0,  0.5, "Dev. Frontend",            "tarea"),
    ("5.3", "Publicación",                       12.0,  0.5, "DevOps + Project Mgr",     "tarea"),
    ("H5",  "🏁 HITO 5: Sistema en Producción",  13.0,  0.0, "01/12/2024",               "hito"),

    ("6",   "■ DOCUMENTACIÓN Y CIERRE",          11.0,  4.0, "Tech Writer + Equipo",     "fase"),
    ("6.1", "Documentación técnica",             11.0,  1.0, "Tech Writer + Devs",       "tarea"),
    ("6.2", "Documentación de usuario",          12.0,  1.0, "Tech Writer",              "tarea"),
    ("6.3", "Entrega final",                     14.0,  1.0, "Project Manager",          "tarea"),
    ("H6",  "🏁 HITO 6: Proyecto Finalizado",    15.0,  0.0, "22/12/2024",               "hito"),
];

/// ACEX activities in table order
pub fn activities() -> Vec<Activity> {
    ACTIVITIES
        .iter()
        .map(|&(id, label, start, duration, resource, tag)| {
            Activity::new(id, label)
                .starts_at(start)
                .lasts(duration)
                .resource(resource)
                .kind(ActivityKind::from_tag(tag))
        })
        .collect()
}

pub fn gantt_report() -> GanttReport {
    GanttReport::new(start_date())
        .sheet_name("Diagrama de Gantt - ACEX")
        .title("PROYECTO ACEX - DIAGRAMA DE GANTT")
        .subtitle("Duración: 16 semanas | Periodo: Septiembre - Diciembre 2024")
        .activities(activities())
}

/// Resource, quantity/type, C:D description, E:F unit cost, total
fn cost_columns(second: &str, third: &str, fourth: &str, last: &str) -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Recurso"),
        ColumnSpec::new(second),
        ColumnSpec::new(third).span(2),
        ColumnSpec::new(fourth).span(2).numeric(),
        ColumnSpec::new(last).numeric(),
    ]
}

fn with_columns(mut section: Section, columns: Vec<ColumnSpec>) -> Section {
    for column in columns {
        section = section.column(column);
    }
    section
}

fn human_resources() -> Section {
    let mut section = Section::new("📋 7.3.1 RECURSOS HUMANOS");
    for label in ["Rol", "Cantidad", "Dedicación", "Periodo"] {
        section = section.column(ColumnSpec::new(label));
    }
    for label in ["Horas/Sem", "Semanas", "Coste Total"] {
        section = section.column(ColumnSpec::new(label).numeric());
    }

    section
        .record(record!["Project Manager", 1, "Tiempo parcial (25%)", "Todo el proyecto", 10, 16, "8.000 €"])
        .record(record!["Analista/Arquitecto", 1, "Tiempo completo", "Semanas 1-3", 40, 3, "6.600 €"])
        .record(record!["Dev. Backend Senior", 1, "Tiempo completo", "Semanas 3-11", 40, 8, "14.400 €"])
        .record(record!["Dev. Backend Junior", 1, "Tiempo completo", "Semanas 4-11", 40, 7, "8.400 €"])
        .record(record!["Dev. Frontend Senior", 1, "Tiempo completo", "Semanas 4-14", 40, 10, "18.000 €"])
        .record(record!["Dev. Frontend Junior", 1, "Tiempo completo", "Semanas 5-14", 40, 9, "10.800 €"])
        .record(record!["QA/Tester", 1, "Tiempo parcial (50%)", "Semanas 11-14", 20, 3, "2.100 €"])
        .record(record!["DevOps Engineer", 1, "Tiempo parcial (50%)", "Semanas 14-16", 20, 2, "2.000 €"])
        .record(record!["UI/UX Designer", 1, "Tiempo parcial (25%)", "Semanas 1-6", 10, 5, "2.000 €"])
        .record(record!["Technical Writer", 1, "Tiempo parcial (50%)", "Semanas 14-17", 20, 3, "2.100 €"])
        .subtotal("SUBTOTAL RECURSOS HUMANOS", "74.400 €")
}

fn hardware() -> Section {
    with_columns(
        Section::new("💻 7.3.2 RECURSOS TÉCNICOS (HARDWARE)"),
        cost_columns("Cantidad", "Uso", "Coste Unit.", "Coste Total"),
    )
    .record(record!["Portátil Dev (Windows)", 4, "Desarrollo backend/frontend", "1.200 €", "4.800 €"])
    .record(record!["Portátil Dev (MacBook Pro)", 2, "Desarrollo iOS", "2.500 €", "5.000 €"])
    .record(record!["Servidor local desarrollo", 1, "Testing y pruebas", "1.500 €", "1.500 €"])
    .record(record!["iPhone (testing iOS)", 1, "Testing aplicación iOS", "800 €", "800 €"])
    .record(record!["Android devices (varios)", 3, "Testing aplicación Android", "300 €", "900 €"])
    .record(record!["Tablet Android", 1, "Testing UI responsive", "400 €", "400 €"])
    .record(record!["Monitor adicional", 6, "Mejora productividad", "200 €", "1.200 €"])
    .record(record!["Almacenamiento NAS", 1, "Backup y compartir archivos", "600 €", "600 €"])
    .subtotal("SUBTOTAL HARDWARE", "15.200 €")
}

fn software() -> Section {
    with_columns(
        Section::new("🔧 7.3.3 RECURSOS TÉCNICOS (SOFTWARE Y SERVICIOS)"),
        cost_columns("Tipo", "Uso", "Coste Mensual", "Coste Total (4m)"),
    )
    .record(record!["Visual Studio Professional", "Licencia", "IDE backend", "45 € × 2 dev", "360 €"])
    .record(record!["JetBrains IntelliJ/Rider", "Licencia", "IDE alternativo", "24 € × 2 dev", "192 €"])
    .record(record!["GitHub Pro", "Suscripción", "Control de versiones", "4 € × 10 users", "160 €"])
    .record(record!["Azure SQL Database", "Cloud", "Base de datos desarrollo", "50 €", "200 €"])
    .record(record!["Azure App Service", "Cloud", "Hosting API desarrollo", "40 €", "160 €"])
    .record(record!["Firebase Blaze Plan", "Cloud", "Firestore + Storage + FCM", "30 €", "120 €"])
    .record(record!["Google Play Console", "Pago único", "Publicación Android", "-", "25 €"])
    .record(record!["Apple Developer Program", "Anual", "Publicación iOS", "99 €", "99 €"])
    .record(record!["Figma Pro", "Suscripción", "Diseño UI/UX", "12 €", "48 €"])
    .record(record!["Postman Team", "Suscripción", "Testing APIs", "24 €", "96 €"])
    .record(record!["Jira Software", "Suscripción", "Gestión de proyecto", "10 € × 10 users", "400 €"])
    .record(record!["Slack Pro", "Suscripción", "Comunicación equipo", "6 € × 10 users", "240 €"])
    .record(record!["Office 365 Business", "Suscripción", "Documentación", "10 € × 10 users", "400 €"])
    .subtotal("SUBTOTAL SOFTWARE Y SERVICIOS (4 meses)", "2.500 €")
}

fn infrastructure() -> Section {
    with_columns(
        Section::new("☁️ 7.3.4 INFRAESTRUCTURA DE PRODUCCIÓN"),
        cost_columns("Proveedor", "Especificaciones", "Coste Mensual", "Coste Anual"),
    )
    .record(record!["SQL Server Database", "Azure", "Standard S2 (50 DTUs)", "75 €", "900 €"])
    .record(record!["App Service (API)", "Azure", "Premium P1V2", "140 €", "1.680 €"])
    .record(record!["Firebase Hosting", "Google", "Blaze Plan (uso moderado)", "50 €", "600 €"])
    .record(record!["CDN (imágenes)", "Cloudflare", "Pro Plan", "20 €", "240 €"])
    .record(record!["Dominio .com", "GoDaddy", "Registro anual", "-", "12 €"])
    .record(record!["SSL Certificate", "Let's Encrypt", "Gratuito", "0 €", "0 €"])
    .record(record!["Backup Storage", "Azure Blob", "100 GB redundante", "5 €", "60 €"])
    .record(record!["Monitoring (App Insights)", "Azure", "Uso básico", "15 €", "180 €"])
    .subtotal("SUBTOTAL INFRAESTRUCTURA (primer año)", "3.672 €")
}

fn logistics() -> Section {
    with_columns(
        Section::new("🏢 7.3.5 ESPACIOS Y LOGÍSTICA"),
        cost_columns("Tipo", "Cantidad", "Coste Mensual", "Coste Total (4m)"),
    )
    .record(record!["Espacio de oficina", "Alquiler", "50 m²", "800 €", "3.200 €"])
    .record(record!["Internet de alta velocidad", "Servicio", "1 línea 600 Mbps", "60 €", "240 €"])
    .record(record!["Electricidad y servicios", "Servicios", "-", "150 €", "600 €"])
    .record(record!["Mobiliario (mesas, sillas)", "Compra", "Para 10 personas", "-", "2.500 €"])
    .record(record!["Material de oficina", "Consumibles", "-", "50 €", "200 €"])
    .record(record!["Café y snacks", "Beneficios", "-", "100 €", "400 €"])
    .subtotal("SUBTOTAL ESPACIOS Y LOGÍSTICA (4 meses)", "7.140 €")
}

pub fn resource_sheet() -> ResourceSheet {
    ResourceSheet::new()
        .section(human_resources())
        .section(hardware())
        .section(software())
        .section(infrastructure())
        .section(logistics())
        .total("💰 TOTAL RECURSOS Y LOGÍSTICA", "102.912 €")
        .summary_title("📊 RESUMEN POR CATEGORÍAS")
        .summary_headers("Categoría", "Importe", "% del Total")
        .summary_entry(SummaryEntry::new("Recursos Humanos", "74.400 €", 72.3))
        .summary_entry(SummaryEntry::new("Hardware", "15.200 €", 14.8))
        .summary_entry(SummaryEntry::new("Software y Servicios (4 meses)", "2.500 €", 2.4))
        .summary_entry(SummaryEntry::new("Infraestructura (primer año)", "3.672 €", 3.6))
        .summary_entry(SummaryEntry::new("Espacios y Logística (4 meses)", "7.140 €", 6.9))
}

pub fn resources_report() -> ResourcesReport {
    ResourcesReport::new(resource_sheet())
        .sheet_name("Recursos y Logística")
        .title("RECURSOS Y LOGÍSTICA - PROYECTO ACEX")
        .subtitle("Resumen completo de recursos humanos, técnicos y logísticos")
}
