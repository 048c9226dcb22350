use reqwest::multipart::Form;

use crate::common::{TestApp, bumbu_form, image_part, png, routes};

mod create {
    use super::*;

    #[tokio::test]
    async fn valid_fields_and_png_create_a_row_pointing_at_the_upload() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let form = bumbu_form("Bumbu Rendang", "Rendang Padang", "25000")
            .part("gambar", png("rendang.png"));
        let res = app.post_form(routes::BUMBU, form, Some(&token)).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["status"], true);
        assert_eq!(res.body["statusCode"], 201);
        assert_eq!(res.message(), "Bumbu berhasil ditambahkan");

        let created = &res.body["newBumbu"];
        assert_eq!(created["nama"], "Bumbu Rendang");
        assert_eq!(created["harga"], 25000);

        let gambar = created["gambar"].as_str().unwrap();
        let prefix = format!("http://{}/uploads/bumbu/", app.addr);
        assert!(gambar.starts_with(&prefix), "{gambar}");
        assert!(gambar.ends_with("-rendang.png"), "{gambar}");
        assert!(app.object_exists(gambar).await);

        // The filesystem store serves what it holds.
        let served = app.client.get(gambar).send().await.unwrap();
        assert_eq!(served.status().as_u16(), 200);
        assert_eq!(&served.bytes().await.unwrap()[..], b"\x89PNG\r\n\x1a\nfake");
    }

    #[tokio::test]
    async fn each_missing_field_has_its_own_message() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let cases = [
            (
                Form::new().text("deskripsi", "d").text("harga", "1"),
                "Nama wajib diisi",
            ),
            (
                Form::new().text("nama", "n").text("harga", "1"),
                "Deskripsi wajib diisi",
            ),
            (
                Form::new().text("nama", "n").text("deskripsi", "d"),
                "Harga wajib diisi",
            ),
            (bumbu_form("n", "   ", "1"), "Deskripsi tidak boleh kosong"),
        ];

        for (form, expected) in cases {
            let form = form.part("gambar", png("a.png"));
            let res = app.post_form(routes::BUMBU, form, Some(&token)).await;
            assert_eq!(res.status, 400, "{}", res.text);
            assert_eq!(res.message(), expected);
        }
        assert_eq!(app.stored_objects("bumbu"), 0);
    }

    #[tokio::test]
    async fn harga_must_be_a_plain_digit_string() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        for harga in ["-100", "12.5", "dua puluh", "1e3"] {
            let form = bumbu_form("Rendang", "Pedas", harga).part("gambar", png("a.png"));
            let res = app.post_form(routes::BUMBU, form, Some(&token)).await;
            assert_eq!(res.status, 400, "{harga}: {}", res.text);
            assert!(res.message().contains("harus berupa angka bulat"), "{}", res.text);
        }
    }

    #[tokio::test]
    async fn image_is_required() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_form(routes::BUMBU, bumbu_form("Rendang", "Pedas", "100"), Some(&token))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.message(), "Gambar wajib diunggah");
    }

    #[tokio::test]
    async fn unsupported_extension_is_rejected_and_nothing_is_stored() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let form = bumbu_form("Rendang", "Pedas", "100").part(
            "gambar",
            image_part("menu.pdf", b"%PDF-1.4".to_vec(), "application/pdf"),
        );
        let res = app.post_form(routes::BUMBU, form, Some(&token)).await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.message(),
            "Format file tidak valid. Hanya diperbolehkan jpg, jpeg, png, webp"
        );
        assert_eq!(app.stored_objects("bumbu"), 0);
        let list = app.get(routes::BUMBU).await;
        assert_eq!(list.body["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;

        let form = bumbu_form("Rendang", "Pedas", "100").part("gambar", png("a.png"));
        let res = app.post_form(routes::BUMBU, form, None).await;

        assert_eq!(res.status, 401);
        assert_eq!(app.stored_objects("bumbu"), 0);
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn list_and_get_are_public() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let created = app.create_bumbu(&token, "Rendang").await;
        app.create_bumbu(&token, "Soto").await;
        let id = created.id_at("/newBumbu/id");

        let list = app.get(routes::BUMBU).await;
        assert_eq!(list.status, 200);
        assert_eq!(list.message(), "Success get all bumbu");
        assert_eq!(list.body["data"].as_array().unwrap().len(), 2);

        let one = app.get(&routes::bumbu(&id)).await;
        assert_eq!(one.status, 200);
        assert_eq!(one.body["data"]["nama"], "Rendang");
    }

    #[tokio::test]
    async fn unknown_id_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::bumbu("999")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["status"], false);
        assert_eq!(res.message(), "Bumbu tidak ditemukan");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn unknown_id_is_404_before_any_image_work() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let form = Form::new().text("nama", "Baru").part("gambar", png("baru.png"));
        let res = app.put_form(&routes::bumbu("999"), form, &token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.message(), "Bumbu tidak ditemukan");
        assert_eq!(app.stored_objects("bumbu"), 0);
    }

    #[tokio::test]
    async fn omitted_fields_keep_their_values() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let created = app.create_bumbu(&token, "Rendang").await;
        let id = created.id_at("/newBumbu/id");

        let form = Form::new().text("harga", "30000");
        let res = app.put_form(&routes::bumbu(&id), form, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let updated = &res.body["updateBumbu"];
        assert_eq!(updated["harga"], 30000);
        assert_eq!(updated["nama"], "Rendang");
        assert_eq!(updated["gambar"], created.body["newBumbu"]["gambar"]);
    }

    #[tokio::test]
    async fn new_image_replaces_the_old_one() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let created = app.create_bumbu(&token, "Rendang").await;
        let id = created.id_at("/newBumbu/id");
        let old_url = created.body["newBumbu"]["gambar"].as_str().unwrap().to_string();

        let form = Form::new().part("gambar", png("baru.webp"));
        let res = app.put_form(&routes::bumbu(&id), form, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let new_url = res.body["updateBumbu"]["gambar"].as_str().unwrap();
        assert_ne!(new_url, old_url);
        assert!(new_url.ends_with("-baru.webp"));
        assert!(app.object_exists(new_url).await);
        assert!(!app.object_exists(&old_url).await);
        assert_eq!(app.stored_objects("bumbu"), 1);
    }

    #[tokio::test]
    async fn invalid_new_image_keeps_the_old_one() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let created = app.create_bumbu(&token, "Rendang").await;
        let id = created.id_at("/newBumbu/id");
        let old_url = created.body["newBumbu"]["gambar"].as_str().unwrap().to_string();

        let form = Form::new().part("gambar", image_part("anim.gif", b"GIF89a".to_vec(), "image/gif"));
        let res = app.put_form(&routes::bumbu(&id), form, &token).await;

        assert_eq!(res.status, 400);
        assert!(app.object_exists(&old_url).await);
    }

    #[tokio::test]
    async fn blank_field_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_bumbu(&token, "Rendang").await.id_at("/newBumbu/id");

        let res = app
            .put_form(&routes::bumbu(&id), Form::new().text("nama", " "), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.message(), "Nama tidak boleh kosong");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn removes_the_row_and_its_image() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let created = app.create_bumbu(&token, "Rendang").await;
        let id = created.id_at("/newBumbu/id");

        let res = app.delete(&routes::bumbu(&id), Some(&token)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.message(), "Bumbu berhasil dihapus");
        assert_eq!(app.stored_objects("bumbu"), 0);
        assert_eq!(app.get(&routes::bumbu(&id)).await.status, 404);
    }

    #[tokio::test]
    async fn unknown_id_is_404() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.delete(&routes::bumbu("42"), Some(&token)).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_bumbu(&token, "Rendang").await.id_at("/newBumbu/id");

        let res = app.delete(&routes::bumbu(&id), None).await;

        assert_eq!(res.status, 401);
        assert_eq!(app.get(&routes::bumbu(&id)).await.status, 200);
    }
}
